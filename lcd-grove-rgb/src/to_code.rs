use codegen::{process_lambda, ClassRef, CppType, Expression, Instruction, Parameter};
use tracing::debug;

use crate::schema::LcdGroveRgbConfig;

pub const NAMESPACE: &str = "lcd_grove_rgb";
pub const CLASS_NAME: &str = "LCDGroveRGB";
/// Source name reported by the component at runtime.
pub const COMPONENT_SOURCE: &str = "lcd_grove_rgb.display";

pub fn lcd_class() -> ClassRef {
    ClassRef::new(NAMESPACE, CLASS_NAME)
}

/// Initialization of one display, in the order the driver expects.
///
/// Registration comes before any setter. User characters follow
/// `set_dimensions` and keep their configured order. The writer, if any,
/// is attached last.
pub fn to_code(config: &LcdGroveRgbConfig, var: &str) -> Vec<Instruction> {
    let class = lcd_class();
    let mut program = vec![
        Instruction::NewVariable {
            id: var.to_string(),
            class: class.clone(),
        },
        Instruction::RegisterDisplay {
            var: var.to_string(),
            component: COMPONENT_SOURCE.to_string(),
            update_interval: config.polling.update_interval,
        },
        Instruction::RegisterI2cDevice {
            var: var.to_string(),
            bus: config.i2c.bus.clone(),
            address: config.i2c.address,
        },
        Instruction::call(
            var,
            "set_dimensions",
            vec![config.dimensions.width.into(), config.dimensions.height.into()],
        ),
        Instruction::call(
            var,
            "set_backlight_address",
            vec![Expression::HexInt(config.backlight_address.value().into())],
        ),
        Instruction::call(var, "set_clear_on_update", vec![config.clear_on_update.into()]),
        Instruction::call(var, "set_home_on_update", vec![config.home_on_update.into()]),
    ];

    for character in &config.user_characters {
        program.push(Instruction::call(
            var,
            "set_user_defined_char",
            vec![
                character.position.into(),
                Expression::Array(character.data.iter().map(|&row| row.into()).collect()),
            ],
        ));
    }

    if let Some(lambda) = &config.display.lambda {
        let writer = process_lambda(
            lambda,
            vec![Parameter::new(class.reference(), "it")],
            CppType::void(),
        );
        program.push(Instruction::call(var, "set_writer", vec![writer.into()]));
    }

    debug!(
        id = var,
        dimensions = %config.dimensions,
        user_characters = config.user_characters.len(),
        writer = config.display.lambda.is_some(),
        "emitted lcd_grove_rgb wiring"
    );
    program
}
