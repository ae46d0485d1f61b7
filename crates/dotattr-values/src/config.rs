//! Validation settings.

use serde::Deserialize;

use crate::validation::{Diagnostic, Severity};

/// Options for [`validate_with_config`](crate::validation::validate_with_config).
///
/// ```
/// use dotattr_values::ValidationConfig;
///
/// let config = ValidationConfig::from_json(r#"{"deny_warnings": true}"#).unwrap();
/// assert!(config.deny_warnings);
/// assert!(!config.report_unknown_attributes);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Emit a warning for attributes the registry does not know.
    pub report_unknown_attributes: bool,
    /// Treat warnings as failures in [`ValidationConfig::fails`].
    pub deny_warnings: bool,
}

impl ValidationConfig {
    pub fn from_json(json: &str) -> dotattr_types::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a diagnostic counts as a failure under this configuration.
    pub fn fails(&self, diagnostic: &Diagnostic) -> bool {
        match diagnostic.severity {
            Severity::Error => true,
            Severity::Warning => self.deny_warnings,
        }
    }

    pub fn has_failures(&self, diagnostics: &[Diagnostic]) -> bool {
        diagnostics.iter().any(|d| self.fails(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotattr_types::ElementKind;

    fn diagnostic(severity: Severity) -> Diagnostic {
        Diagnostic {
            rule: "attribute_semantics".into(),
            severity,
            kind: ElementKind::Edge,
            element: Some("a->b".into()),
            attribute: "arrowhead".into(),
            span: None,
            message: "The arrowType value 'open' is not semantically correct: The shape 'open' is deprecated.".into(),
        }
    }

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(ValidationConfig::from_json("{}").unwrap(), ValidationConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ValidationConfig::from_json(r#"{"strict": true}"#).unwrap_err();
        assert!(matches!(err, dotattr_types::DotAttrError::Json(_)));
    }

    #[test]
    fn warnings_fail_only_when_denied() {
        let warning = [diagnostic(Severity::Warning)];
        assert!(!ValidationConfig::default().has_failures(&warning));
        let strict = ValidationConfig {
            deny_warnings: true,
            ..Default::default()
        };
        assert!(strict.has_failures(&warning));
        assert!(ValidationConfig::default().fails(&diagnostic(Severity::Error)));
    }
}
