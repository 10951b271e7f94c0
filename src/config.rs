//! Planner settings with command-line overrides.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{Bounds, Rgb, DEFAULT_SEARCH_BUDGET};

const RNG_SEED: u64 = 19878367467712;

pub const USAGE: &str = "\
usage: space-planner [OPTIONS] [WIDTH HEIGHT]

options:
  --rectangle WxH        size of new rectangles (default 80x50)
  --circle RADIUS        radius of new circles (default 30)
  --triangle BASExH      base and height of new triangles (default 80x60)
  --rotation-step DEG    degrees per Q/E press, in (0, 360) (default 15)
  --background #RRGGBB   background colour of window and export
  --export PATH          PNG export target (default room.png)
  --search-budget N      grid candidates tried when adding a shape";

#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    pub room_width: u32,
    pub room_height: u32,
    pub search_budget: u64,
    /// Degrees added or subtracted per rotation command.
    pub rotation_step: f64,
    pub rectangle_size: (f64, f64),
    pub circle_radius: f64,
    /// Base and height.
    pub triangle_size: (f64, f64),
    pub background: Rgb,
    pub export_path: PathBuf,
    pub color_seed: u64,
}

impl PlannerConfig {
    pub fn new(room_width: u32, room_height: u32) -> Self {
        Self {
            room_width,
            room_height,
            search_budget: DEFAULT_SEARCH_BUDGET,
            rotation_step: 15.0,
            rectangle_size: (80.0, 50.0),
            circle_radius: 30.0,
            triangle_size: (80.0, 60.0),
            background: Rgb::new(0xf0, 0xe6, 0xd6),
            export_path: PathBuf::from("room.png"),
            color_seed: RNG_SEED,
        }
    }

    /// Builds the configuration from the command-line arguments following the program name.
    ///
    /// Positional arguments are either nothing or `WIDTH HEIGHT` of the room as positive
    /// integers. Options take their value as the next argument or after `=`, see [`USAGE`].
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = Self::default();
        let mut positional = Vec::new();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            let Some(option) = arg.strip_prefix("--") else {
                positional.push(arg.to_string());
                continue;
            };
            let (name, value) = match option.split_once('=') {
                Some((name, value)) => (name, value.to_string()),
                None => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.to_string()))?;
                    (option, value.as_ref().to_string())
                }
            };
            config.apply_option(name, &value)?;
        }

        match positional.as_slice() {
            [] => {}
            [width, height] => {
                config.room_width = parse_dimension("width", width)?;
                config.room_height = parse_dimension("height", height)?;
            }
            _ => return Err(ConfigError::ArgumentCount(positional.len())),
        }
        Ok(config)
    }

    fn apply_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match name {
            "rectangle" => self.rectangle_size = parse_size("rectangle", value)?,
            "circle" => self.circle_radius = parse_length("circle", value)?,
            "triangle" => self.triangle_size = parse_size("triangle", value)?,
            "rotation-step" => self.rotation_step = parse_rotation_step(value)?,
            "background" => {
                self.background = value
                    .parse()
                    .map_err(|_| ConfigError::InvalidColor(value.to_string()))?
            }
            "export" => self.export_path = PathBuf::from(value),
            "search-budget" => {
                self.search_budget = match value.parse::<u64>() {
                    Ok(budget) if budget > 0 => budget,
                    _ => return Err(ConfigError::InvalidSearchBudget(value.to_string())),
                }
            }
            _ => return Err(ConfigError::UnknownOption(format!("--{name}"))),
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.room_width as f64, self.room_height as f64)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(600, 400)
    }
}

fn parse_dimension(axis: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::InvalidDimension {
            axis,
            value: value.to_string(),
        }),
    }
}

/// Parses `WxH` into two positive lengths.
fn parse_size(shape: &'static str, value: &str) -> Result<(f64, f64), ConfigError> {
    let (first, second) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| ConfigError::InvalidShapeSize {
            shape,
            value: value.to_string(),
        })?;
    Ok((parse_length(shape, first)?, parse_length(shape, second)?))
}

fn parse_length(shape: &'static str, value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(length) if length.is_finite() && length > 0.0 => Ok(length),
        _ => Err(ConfigError::InvalidShapeSize {
            shape,
            value: value.to_string(),
        }),
    }
}

fn parse_rotation_step(value: &str) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(step) if step > 0.0 && step < 360.0 => Ok(step),
        _ => Err(ConfigError::InvalidRotationStep(value.to_string())),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid room {axis} {value:?}, must be a positive integer")]
    InvalidDimension { axis: &'static str, value: String },
    #[error("invalid {shape} size {value:?}, must be positive")]
    InvalidShapeSize { shape: &'static str, value: String },
    #[error("invalid rotation step {0:?}, must be between 0 and 360 degrees")]
    InvalidRotationStep(String),
    #[error("invalid colour {0:?}, expected #RRGGBB")]
    InvalidColor(String),
    #[error("invalid search budget {0:?}, must be a positive integer")]
    InvalidSearchBudget(String),
    #[error("option {0} needs a value")]
    MissingValue(String),
    #[error("unknown option {0}")]
    UnknownOption(String),
    #[error("expected no arguments or WIDTH HEIGHT, got {0} arguments")]
    ArgumentCount(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_default() {
        let config = PlannerConfig::default();
        assert_eq!(config.bounds(), Bounds::new(600.0, 400.0));
        assert_eq!(config.search_budget, DEFAULT_SEARCH_BUDGET);
        assert_eq!(config.background.to_string(), "#f0e6d6");
        assert_eq!(config.export_path, PathBuf::from("room.png"));
    }

    #[rstest]
    #[case::no_arguments(&[], Ok((600, 400)))]
    #[case::room_size(&["800", "300"], Ok((800, 300)))]
    #[case::zero_width(
        &["0", "300"],
        Err(ConfigError::InvalidDimension { axis: "width", value: "0".to_string() })
    )]
    #[case::negative_height(
        &["800", "-3"],
        Err(ConfigError::InvalidDimension { axis: "height", value: "-3".to_string() })
    )]
    #[case::not_a_number(
        &["wide", "300"],
        Err(ConfigError::InvalidDimension { axis: "width", value: "wide".to_string() })
    )]
    #[case::single_argument(&["800"], Err(ConfigError::ArgumentCount(1)))]
    #[case::too_many_arguments(&["1", "2", "3"], Err(ConfigError::ArgumentCount(3)))]
    fn test_from_args(#[case] args: &[&str], #[case] expected: Result<(u32, u32), ConfigError>) {
        assert_eq!(
            PlannerConfig::from_args(args).map(|c| (c.room_width, c.room_height)),
            expected
        );
    }
    #[test]
    fn test_shape_options() {
        let config = PlannerConfig::from_args([
            "--rectangle",
            "120x40",
            "--circle=12.5",
            "--triangle",
            "30X20",
            "--rotation-step",
            "90",
            "1000",
            "500",
        ])
        .unwrap();

        assert_eq!((config.room_width, config.room_height), (1000, 500));
        assert_eq!(config.rectangle_size, (120.0, 40.0));
        assert_eq!(config.circle_radius, 12.5);
        assert_eq!(config.triangle_size, (30.0, 20.0));
        assert_eq!(config.rotation_step, 90.0);
    }

    #[test]
    fn test_output_options() {
        let config = PlannerConfig::from_args([
            "--background=#102030",
            "--export",
            "plan.png",
            "--search-budget",
            "500",
        ])
        .unwrap();

        assert_eq!(config.background, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(config.export_path, PathBuf::from("plan.png"));
        assert_eq!(config.search_budget, 500);
        assert_eq!(config.bounds(), Bounds::new(600.0, 400.0));
    }

    #[rstest]
    #[case::missing_height(
        &["--rectangle", "120"],
        ConfigError::InvalidShapeSize { shape: "rectangle", value: "120".to_string() }
    )]
    #[case::zero_radius(
        &["--circle", "0"],
        ConfigError::InvalidShapeSize { shape: "circle", value: "0".to_string() }
    )]
    #[case::negative_base(
        &["--triangle=-3x4"],
        ConfigError::InvalidShapeSize { shape: "triangle", value: "-3".to_string() }
    )]
    #[case::full_turn(
        &["--rotation-step", "360"],
        ConfigError::InvalidRotationStep("360".to_string())
    )]
    #[case::bad_colour(&["--background", "red"], ConfigError::InvalidColor("red".to_string()))]
    #[case::zero_budget(
        &["--search-budget", "0"],
        ConfigError::InvalidSearchBudget("0".to_string())
    )]
    #[case::missing_value(&["--circle"], ConfigError::MissingValue("--circle".to_string()))]
    #[case::unknown_option(
        &["--hexagon", "3"],
        ConfigError::UnknownOption("--hexagon".to_string())
    )]
    fn test_invalid_options(#[case] args: &[&str], #[case] expected: ConfigError) {
        assert_eq!(PlannerConfig::from_args(args), Err(expected));
    }
}
