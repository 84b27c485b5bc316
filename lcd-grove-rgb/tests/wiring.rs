//! Emission order and rendering of the Grove RGB LCD wiring

use codegen::{
    Backend, CodegenError, CppBackend, Expression, Generator, Instruction, JsonBackend,
    PlatformRegistry,
};
use config_schema::{ConfigSchema, UpdateInterval};
use lcd_grove_rgb::*;
use proptest::prelude::*;
use serde_yaml::Value;

fn yaml(src: &str) -> Value {
    serde_yaml::from_str(src).unwrap()
}

fn generator() -> Generator {
    let mut registry = PlatformRegistry::new();
    registry.register(LcdGroveRgbPlatform::shared()).unwrap();
    Generator::new(registry)
}

fn methods(program: &[Instruction]) -> Vec<&str> {
    program.iter().filter_map(Instruction::method).collect()
}

#[test]
fn test_default_emission_order() {
    let config = LcdGroveRgbConfig::validate(&yaml("{}")).unwrap();
    let program = to_code(&config, "lcd");

    assert!(matches!(program[0], Instruction::NewVariable { ref id, .. } if id == "lcd"));
    assert!(matches!(
        program[1],
        Instruction::RegisterDisplay { update_interval: UpdateInterval::Milliseconds(1000), .. }
    ));
    assert!(matches!(program[2], Instruction::RegisterI2cDevice { bus: None, .. }));
    assert_eq!(
        methods(&program),
        [
            "set_dimensions",
            "set_backlight_address",
            "set_clear_on_update",
            "set_home_on_update",
        ]
    );
    assert_eq!(
        program[3],
        Instruction::call("lcd", "set_dimensions", vec![Expression::Int(16), Expression::Int(2)])
    );
    assert_eq!(
        program[4],
        Instruction::call("lcd", "set_backlight_address", vec![Expression::HexInt(0x62)])
    );
}

#[test]
fn test_characters_follow_dimensions_in_input_order() {
    let config = LcdGroveRgbConfig::validate(&yaml(
        "
user_characters:
  - position: 6
    data: [1, 2, 3, 4, 5, 6, 7, 8]
  - position: 1
    data: [8, 7, 6, 5, 4, 3, 2, 1]
lambda: 'it.print(\"x\");'
",
    ))
    .unwrap();
    let program = to_code(&config, "lcd");
    let names = methods(&program);
    assert_eq!(
        names,
        [
            "set_dimensions",
            "set_backlight_address",
            "set_clear_on_update",
            "set_home_on_update",
            "set_user_defined_char",
            "set_user_defined_char",
            "set_writer",
        ]
    );
    let Instruction::Call { args, .. } = &program[7] else {
        panic!("expected a call");
    };
    assert_eq!(args[0], Expression::Int(6));
    let Instruction::Call { args, .. } = &program[8] else {
        panic!("expected a call");
    };
    assert_eq!(args[0], Expression::Int(1));
}

#[test]
fn test_writer_lambda_binds_it_reference() {
    let config = LcdGroveRgbConfig::validate(&yaml("lambda: !lambda 'it.print(\"Hi\");'")).unwrap();
    let program = to_code(&config, "lcd");
    let Some(Instruction::Call { method, args, .. }) = program.last() else {
        panic!("expected a call");
    };
    assert_eq!(method, "set_writer");
    let Expression::Lambda(lambda) = &args[0] else {
        panic!("expected a lambda");
    };
    assert_eq!(lambda.parameters.len(), 1);
    assert_eq!(lambda.parameters[0].name, "it");
    assert_eq!(lambda.parameters[0].ty.as_str(), "lcd_grove_rgb::LCDGroveRGB &");
    assert_eq!(lambda.return_type.as_str(), "void");
    assert_eq!(lambda.body, "it.print(\"Hi\");");
}

proptest! {
    #[test]
    fn registrations_precede_setters(
        columns in 1u32..=64,
        rows in 1u32..=4,
        chars in Just((0u8..=7).collect::<Vec<_>>()).prop_shuffle(),
        count in 0usize..=8,
        writer in any::<bool>(),
    ) {
        let characters: Vec<String> = chars
            .iter()
            .take(count)
            .map(|p| format!("{{position: {p}, data: [0, 0, 0, 0, 0, 0, 0, 0]}}"))
            .collect();
        let mut src = format!("dimensions: {columns}x{rows}\nuser_characters: [{}]\n", characters.join(", "));
        if writer {
            src.push_str("lambda: 'it.clear();'\n");
        }
        let config = LcdGroveRgbConfig::validate(&yaml(&src)).unwrap();
        let program = to_code(&config, "lcd");

        let last_registration = program.iter().rposition(Instruction::is_registration).unwrap();
        let first_call = program.iter().position(|i| i.method().is_some()).unwrap();
        prop_assert!(last_registration < first_call);

        let dims_at = program.iter().position(|i| i.method() == Some("set_dimensions")).unwrap();
        let emitted: Vec<i64> = program
            .iter()
            .enumerate()
            .filter(|(_, i)| i.method() == Some("set_user_defined_char"))
            .map(|(at, i)| {
                assert!(at > dims_at);
                match i {
                    Instruction::Call { args, .. } => match args[0] {
                        Expression::Int(p) => p,
                        _ => -1,
                    },
                    _ => -1,
                }
            })
            .collect();
        let expected: Vec<i64> = chars.iter().take(count).map(|&p| i64::from(p)).collect();
        prop_assert_eq!(emitted, expected);
        prop_assert_eq!(program.last().and_then(Instruction::method) == Some("set_writer"), writer);
    }
}

#[test]
fn test_document_renders_cpp() {
    let document = yaml(
        r#"
i2c:
  sda: 21
  scl: 22
display:
  - platform: lcd_grove_rgb
    id: lcd
    dimensions: 16x2
    user_characters:
      - position: 0
        data: [0, 10, 10, 0, 17, 14, 0, 0]
    lambda: |-
      it.print("Hello!");
"#,
    );
    let program = generator().generate_document(&document).unwrap();
    let out = CppBackend::default().render(&program).unwrap();
    let expected = "\
// Generated by lcdgen. Do not edit.
lcd_grove_rgb::LCDGroveRGB *lcd;

void setup() {
  lcd = new lcd_grove_rgb::LCDGroveRGB();
  lcd->set_update_interval(1000);
  lcd->set_component_source(\"lcd_grove_rgb.display\");
  App.register_component(lcd);
  App.register_display(lcd);
  lcd->set_i2c_bus(i2c_bus);
  lcd->set_i2c_address(0x3E);
  lcd->set_dimensions(16, 2);
  lcd->set_backlight_address(0x62);
  lcd->set_clear_on_update(true);
  lcd->set_home_on_update(false);
  lcd->set_user_defined_char(0, {0, 10, 10, 0, 17, 14, 0, 0});
  lcd->set_writer([=](lcd_grove_rgb::LCDGroveRGB & it) -> void {
  it.print(\"Hello!\");
  });
}
";
    assert_eq!(out, expected);
}

#[test]
fn test_two_displays_get_distinct_generated_ids() {
    let program = generator()
        .generate_document(&yaml(
            "display:\n  - platform: lcd_grove_rgb\n  - platform: lcd_grove_rgb\n    address: 0x3F\n",
        ))
        .unwrap();
    let vars: Vec<&str> = program
        .iter()
        .filter_map(|i| match i {
            Instruction::NewVariable { id, .. } => Some(id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(vars, ["lcd_grove_rgb_lcdgrovergb", "lcd_grove_rgb_lcdgrovergb_1"]);
}

#[test]
fn test_failure_produces_no_instructions() {
    let result = generator().generate_document(&yaml(
        "display:\n  - platform: lcd_grove_rgb\n    id: ok\n  - platform: lcd_grove_rgb\n    dimensions: 80x2\n",
    ));
    let err = result.unwrap_err();
    let validation = err.validation().unwrap();
    assert_eq!(validation.message(), "LCD displays can't have more than 64 columns");
    assert_eq!(validation.path(), ["display", "1", "dimensions"]);
}

#[test]
fn test_unknown_display_platform() {
    let err = generator()
        .generate_document(&yaml("display:\n  - platform: ssd1306_i2c\n"))
        .unwrap_err();
    assert!(matches!(err, CodegenError::UnknownPlatform { .. }));
}

#[test]
fn test_json_backend_lists_instructions() {
    let program = generator()
        .generate_component(DOMAIN, PLATFORM_NAME, &yaml("id: lcd\nupdate_interval: never"))
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&JsonBackend::new(false).render(&program).unwrap()).unwrap();
    assert_eq!(json[0]["op"], "new_variable");
    assert_eq!(json[0]["class"]["name"], "LCDGroveRGB");
    assert_eq!(json[1]["op"], "register_display");
    assert_eq!(json[1]["update_interval"], "never");
    assert_eq!(json[2]["address"], 62);
}
