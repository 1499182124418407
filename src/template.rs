use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Name of the EEPROM entry holding the board serial number
pub const SERIAL_NUMBER_FIELD: &str = "serial-number";
/// Name of the EEPROM entry holding the first MAC address of the board
pub const MAC_ADDRESS_FIELD: &str = "mac-address";
/// Name of the EEPROM entry holding the number of MAC addresses per board
pub const NUMBER_MAC_FIELD: &str = "number-mac";

/// Errors raised while looking up or updating template entries
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("EEPROM field '{name}' not found in template")]
    MissingField { name: String },

    #[error("EEPROM field '{name}' appears {count} times in template")]
    DuplicateField { name: String, count: usize },
}

/// Top-level EEPROM template document
///
/// Keys other than `address` and `eeprom` are carried through untouched so a
/// generated record differs from its template only in the allocated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EepromTemplate {
    /// I2C location address of the EEPROM chip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
    /// Ordered list of EEPROM entries
    #[serde(default)]
    pub eeprom: Vec<EepromField>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Single named entry of the `eeprom` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EepromField {
    pub name: String,
    pub value: Value,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl EepromField {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            extra: Mapping::new(),
        }
    }
}

impl EepromTemplate {
    /// Look up the unique entry called `name`
    pub fn field(&self, name: &str) -> Result<&EepromField, TemplateError> {
        let mut matches = self.eeprom.iter().filter(|field| field.name == name);
        let first = matches.next().ok_or_else(|| TemplateError::MissingField {
            name: name.to_string(),
        })?;

        let others = matches.count();
        if others > 0 {
            return Err(TemplateError::DuplicateField {
                name: name.to_string(),
                count: others + 1,
            });
        }

        Ok(first)
    }

    /// Overwrite the value of the entry called `name`
    pub fn set_field_value(&mut self, name: &str, value: impl Into<Value>) -> Result<(), TemplateError> {
        // Reuse the uniqueness check of the read path
        self.field(name)?;

        let value = value.into();
        if let Some(field) = self.eeprom.iter_mut().find(|field| field.name == name) {
            field.value = value;
        }
        Ok(())
    }

    /// Serialize the record as a YAML document
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"
address: 0x50
board: kstr-sama5d27
eeprom:
  - name: serial-number
    value: 0x00000010
  - name: mac-address
    value: AA:BB:CC:00:00:00
  - name: number-mac
    value: 4
  - name: vendor-name
    value: Conclusive
    type: string
"#;

    #[test]
    fn test_parse_template() {
        let template: EepromTemplate = serde_yaml::from_str(TEMPLATE).unwrap();

        assert_eq!(template.address, Some(Value::from(0x50)));
        assert_eq!(template.eeprom.len(), 4);
        assert_eq!(template.field(NUMBER_MAC_FIELD).unwrap().value, Value::from(4));
        assert_eq!(
            template.extra.get("board"),
            Some(&Value::from("kstr-sama5d27"))
        );
        assert_eq!(
            template.field("vendor-name").unwrap().extra.get("type"),
            Some(&Value::from("string"))
        );
    }

    #[test]
    fn test_missing_field() {
        let template: EepromTemplate = serde_yaml::from_str(TEMPLATE).unwrap();

        assert_eq!(
            template.field("product-name"),
            Err(TemplateError::MissingField { name: "product-name".to_string() })
        );
    }

    #[test]
    fn test_duplicate_field() {
        let mut template: EepromTemplate = serde_yaml::from_str(TEMPLATE).unwrap();
        template.eeprom.push(EepromField::new(NUMBER_MAC_FIELD, 8));

        assert_eq!(
            template.field(NUMBER_MAC_FIELD),
            Err(TemplateError::DuplicateField { name: NUMBER_MAC_FIELD.to_string(), count: 2 })
        );
        assert!(template.set_field_value(NUMBER_MAC_FIELD, 2).is_err());
    }

    #[test]
    fn test_set_field_value_keeps_order() {
        let mut template: EepromTemplate = serde_yaml::from_str(TEMPLATE).unwrap();
        template.set_field_value(MAC_ADDRESS_FIELD, "aa:bb:cc:00:00:04").unwrap();

        let names: Vec<&str> = template.eeprom.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![SERIAL_NUMBER_FIELD, MAC_ADDRESS_FIELD, NUMBER_MAC_FIELD, "vendor-name"]);
        assert_eq!(
            template.field(MAC_ADDRESS_FIELD).unwrap().value,
            Value::from("aa:bb:cc:00:00:04")
        );
    }

    #[test]
    fn test_yaml_round_trip_preserves_extras() {
        let template: EepromTemplate = serde_yaml::from_str(TEMPLATE).unwrap();
        let yaml = template.to_yaml().unwrap();
        let reparsed: EepromTemplate = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(reparsed, template);
    }
}
