use crate::template::EepromTemplate;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Load and parse an EEPROM template from a YAML file
pub fn load_template(template_path: &Path) -> Result<EepromTemplate> {
    info!("Loading EEPROM template from: {:?}", template_path);

    let file = File::open(template_path)
        .wrap_err_with(|| format!("Failed to open template '{}'", template_path.display()))?;

    let template: EepromTemplate = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse template '{}'", template_path.display()))?;

    if template.eeprom.is_empty() {
        warn!("Template {:?} has no EEPROM entries", template_path);
    }
    info!("Template contains {} EEPROM entries", template.eeprom.len());

    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::SERIAL_NUMBER_FIELD;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_template() {
        let yaml = r#"
address: 0x50
eeprom:
  - name: serial-number
    value: 0x00000010
  - name: mac-address
    value: AA:BB:CC:00:00:00
  - name: number-mac
    value: 4
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let template = load_template(temp_file.path()).unwrap();
        assert_eq!(template.eeprom.len(), 3);
        assert!(template.field(SERIAL_NUMBER_FIELD).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_template(&dir.path().join("missing.yaml")).unwrap_err();

        assert!(err.to_string().contains("Failed to open template"));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "eeprom: [name: {{").unwrap();

        let err = load_template(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse template"));
    }
}
