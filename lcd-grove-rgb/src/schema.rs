use std::collections::HashSet;

use config_schema::fragments::{
    self, BasicDisplaySchema, I2cDeviceSchema, PollingComponentSchema,
};
use config_schema::{
    validation, ConfigMap, ConfigSchema, Dimensions, I2cAddress, Id, Result, UpdateInterval,
    ValidationError,
};
use serde::Serialize;
use serde_yaml::Value;
use tracing::warn;

pub const CONF_DIMENSIONS: &str = "dimensions";
pub const CONF_USER_CHARACTERS: &str = "user_characters";
pub const CONF_POSITION: &str = "position";
pub const CONF_DATA: &str = "data";
pub const CONF_BACKLIGHT_ADDRESS: &str = "backlight";
pub const CONF_CLEAR_ON_UPDATE: &str = "clear_on_update";
pub const CONF_HOME_ON_UPDATE: &str = "home_on_update";

pub const MAX_COLUMNS: u32 = 64;
pub const MAX_ROWS: u32 = 4;

/// CGRAM holds eight 5x8 glyphs.
pub const MAX_USER_CHARACTERS: usize = 8;
pub const MAX_POSITION: u8 = 7;
pub const GLYPH_ROWS: usize = 8;
/// Five pixels per glyph row.
pub const MAX_GLYPH_ROW: u8 = 0b1_1111;

pub const DEFAULT_DIMENSIONS: Dimensions = Dimensions::new(16, 2);
pub const DEFAULT_UPDATE_INTERVAL: UpdateInterval = UpdateInterval::Milliseconds(1_000);
pub const DEFAULT_I2C_ADDRESS: I2cAddress = I2cAddress::from_7bit(0x3E);
/// PCA9632 backlight controller on the v1-v4 boards.
pub const DEFAULT_BACKLIGHT_ADDRESS: I2cAddress = I2cAddress::from_7bit(0x62);
/// Backlight controller on the v5 board.
pub const BACKLIGHT_ADDRESS_V5: I2cAddress = I2cAddress::from_7bit(0x30);

/// A custom glyph loaded into one CGRAM slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserCharacter {
    pub position: u8,
    pub data: [u8; GLYPH_ROWS],
}

/// Validated configuration of one Grove RGB LCD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LcdGroveRgbConfig {
    pub id: Id,
    pub dimensions: Dimensions,
    pub user_characters: Vec<UserCharacter>,
    pub backlight_address: I2cAddress,
    pub clear_on_update: bool,
    pub home_on_update: bool,
    /// Carries the optional writer lambda.
    pub display: BasicDisplaySchema,
    pub polling: PollingComponentSchema,
    pub i2c: I2cDeviceSchema,
}

impl ConfigSchema for LcdGroveRgbConfig {
    const COMPONENT: &'static str = "lcd_grove_rgb";

    fn extract(map: &mut ConfigMap) -> Result<Self> {
        let id = fragments::generate_id(map)?;
        let dimensions = map.optional_or(CONF_DIMENSIONS, DEFAULT_DIMENSIONS, validate_lcd_dimensions)?;
        let user_characters = map
            .optional(CONF_USER_CHARACTERS, user_characters)?
            .unwrap_or_default();
        let backlight_address = map.optional_or(
            CONF_BACKLIGHT_ADDRESS,
            DEFAULT_BACKLIGHT_ADDRESS,
            validation::i2c_address,
        )?;
        if backlight_address != DEFAULT_BACKLIGHT_ADDRESS && backlight_address != BACKLIGHT_ADDRESS_V5 {
            warn!(
                address = %backlight_address,
                "backlight address matches neither known controller (0x62, 0x30); the driver will treat it as 0x62-compatible"
            );
        }
        let clear_on_update = map.optional_or(CONF_CLEAR_ON_UPDATE, true, validation::boolean)?;
        let home_on_update = map.optional_or(CONF_HOME_ON_UPDATE, false, validation::boolean)?;

        Ok(Self {
            id,
            dimensions,
            user_characters,
            backlight_address,
            clear_on_update,
            home_on_update,
            display: BasicDisplaySchema::extract(map)?,
            polling: PollingComponentSchema::extract(map, DEFAULT_UPDATE_INTERVAL)?,
            i2c: I2cDeviceSchema::extract(map, DEFAULT_I2C_ADDRESS)?,
        })
    }
}

// ============================================================================
// VALIDATORS
// ============================================================================

/// Parse `dimensions`, then apply the LCD size limits.
///
/// # Errors
///
/// Malformed dimensions, or more than 64 columns or 4 rows.
pub fn validate_lcd_dimensions(value: &Value) -> Result<Dimensions> {
    check_lcd_dimensions(validation::dimensions(value)?)
}

/// Columns are checked before rows.
///
/// # Errors
///
/// More than [`MAX_COLUMNS`] columns or [`MAX_ROWS`] rows.
pub fn check_lcd_dimensions(dimensions: Dimensions) -> Result<Dimensions> {
    if dimensions.width > MAX_COLUMNS {
        return Err(ValidationError::new(format!(
            "LCD displays can't have more than {MAX_COLUMNS} columns"
        )));
    }
    if dimensions.height > MAX_ROWS {
        return Err(ValidationError::new(format!(
            "LCD displays can't have more than {MAX_ROWS} rows"
        )));
    }
    Ok(dimensions)
}

/// Reject the first repeated position, in sequence order.
///
/// # Errors
///
/// Two entries share a position.
pub fn validate_user_characters(characters: Vec<UserCharacter>) -> Result<Vec<UserCharacter>> {
    let mut positions = HashSet::with_capacity(characters.len());
    for character in &characters {
        if !positions.insert(character.position) {
            return Err(ValidationError::new(format!(
                "Duplicate user defined character at position {}",
                character.position
            )));
        }
    }
    Ok(characters)
}

fn user_characters(value: &Value) -> Result<Vec<UserCharacter>> {
    let items = validation::ensure_list(value);
    let characters = validation::each(&items, user_character)?;
    validation::length(characters.len(), None, Some(MAX_USER_CHARACTERS))?;
    validate_user_characters(characters)
}

fn user_character(value: &Value) -> Result<UserCharacter> {
    let mut map = ConfigMap::from_value(value, CONF_USER_CHARACTERS)?;
    let position = map.required(CONF_POSITION, |v| validation::u8_range(v, 0, MAX_POSITION))?;
    let data = map.required(CONF_DATA, glyph)?;
    map.finish()?;
    Ok(UserCharacter { position, data })
}

fn glyph(value: &Value) -> Result<[u8; GLYPH_ROWS]> {
    let items = validation::ensure_list(value);
    let rows = validation::each(&items, |v| validation::u8_range(v, 0, MAX_GLYPH_ROW))?;
    validation::length(rows.len(), Some(GLYPH_ROWS), Some(GLYPH_ROWS))?;
    <[u8; GLYPH_ROWS]>::try_from(rows)
        .map_err(|_| ValidationError::new(format!("length of value must be exactly {GLYPH_ROWS}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    fn glyph_at(position: u8) -> UserCharacter {
        UserCharacter {
            position,
            data: [0, 10, 10, 0, 17, 14, 0, 0],
        }
    }

    #[rstest]
    #[case(64, 4)]
    #[case(16, 2)]
    #[case(1, 1)]
    fn test_dimensions_within_limits(#[case] columns: u32, #[case] rows: u32) {
        let dims = Dimensions::new(columns, rows);
        assert_eq!(check_lcd_dimensions(dims).unwrap(), dims);
    }

    #[test]
    fn test_too_many_columns() {
        let err = check_lcd_dimensions(Dimensions::new(65, 4)).unwrap_err();
        assert_eq!(err.message(), "LCD displays can't have more than 64 columns");
    }

    #[test]
    fn test_too_many_rows() {
        let err = check_lcd_dimensions(Dimensions::new(64, 5)).unwrap_err();
        assert_eq!(err.message(), "LCD displays can't have more than 4 rows");
    }

    #[test]
    fn test_columns_checked_before_rows() {
        let err = check_lcd_dimensions(Dimensions::new(80, 8)).unwrap_err();
        assert!(err.message().contains("columns"));
    }

    #[test]
    fn test_lcd_dimensions_from_string() {
        assert_eq!(
            validate_lcd_dimensions(&yaml("20x4")).unwrap(),
            Dimensions::new(20, 4)
        );
        assert_eq!(
            validate_lcd_dimensions(&yaml("'0x4'")).unwrap_err().message(),
            "Width and height must at least be 1"
        );
    }

    #[test]
    fn test_distinct_positions_keep_order() {
        let chars = vec![glyph_at(5), glyph_at(0), glyph_at(7)];
        assert_eq!(validate_user_characters(chars.clone()).unwrap(), chars);
    }

    #[test]
    fn test_duplicate_position_is_named() {
        let err = validate_user_characters(vec![glyph_at(3), glyph_at(1), glyph_at(3)]).unwrap_err();
        assert_eq!(err.message(), "Duplicate user defined character at position 3");
    }

    #[test]
    fn test_first_duplicate_in_sequence_order_wins() {
        let chars = vec![glyph_at(2), glyph_at(6), glyph_at(6), glyph_at(2)];
        let err = validate_user_characters(chars).unwrap_err();
        assert!(err.message().ends_with("position 6"));
    }

    #[test]
    fn test_user_character_shape() {
        let ok = user_character(&yaml("{position: 1, data: [0, 1, 2, 3, 4, 5, 6, 31]}")).unwrap();
        assert_eq!(ok.data[7], 31);

        let err = user_character(&yaml("{position: 8, data: [0, 0, 0, 0, 0, 0, 0, 0]}")).unwrap_err();
        assert_eq!(err.path(), ["position"]);

        let err = user_character(&yaml("{position: 0, data: [0, 0, 0, 0, 0, 0, 0, 32]}")).unwrap_err();
        assert_eq!(err.path(), ["data", "7"]);

        let err = user_character(&yaml("{position: 0, data: [0, 0, 0]}")).unwrap_err();
        assert_eq!(err.message(), "length of value must be at least 8");

        let err = user_character(&yaml("{data: [0, 0, 0, 0, 0, 0, 0, 0]}")).unwrap_err();
        assert_eq!(
            err.message(),
            "'position' is a required option for [user_characters]"
        );
    }

    #[test]
    fn test_single_user_character_mapping_is_a_list() {
        let chars = user_characters(&yaml("{position: 4, data: [1, 1, 1, 1, 1, 1, 1, 1]}")).unwrap();
        assert_eq!(chars.len(), 1);
        assert_eq!(chars[0].position, 4);
    }

    #[test]
    fn test_more_than_eight_characters() {
        let entries: Vec<String> = (0..9)
            .map(|i| format!("{{position: {}, data: [0, 0, 0, 0, 0, 0, 0, 0]}}", i % 8))
            .collect();
        let err = user_characters(&yaml(&format!("[{}]", entries.join(", ")))).unwrap_err();
        assert_eq!(err.message(), "length of value must be at most 8");
    }
}
