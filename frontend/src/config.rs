//! Page integration settings.
//!
//! Defaults match the stock loan form markup. A page can override any subset by
//! embedding `<script type="application/json" id="loan-form-config">` with the
//! keys it wants to change.

use serde::{Deserialize, Serialize};

use crate::error::EnhancerError;
use crate::normalizer::FieldKind;

/// Id of the optional inline JSON block read at boot.
pub const CONFIG_ELEMENT_ID: &str = "loan-form-config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// The six required loan parameters, in form order.
pub fn loan_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("principal", FieldKind::Currency),
        FieldSpec::new("tasa_anual", FieldKind::Percent),
        FieldSpec::new("pago_mensual_fijo", FieldKind::Currency),
        FieldSpec::new("pago_mensual_adicional", FieldKind::Currency),
        FieldSpec::new("plazo_anios", FieldKind::Integer),
        FieldSpec::new("plazo_meses", FieldKind::Integer),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub form_id: String,
    pub results_id: String,
    pub theme_toggle_id: String,
    pub export_button_id: String,
    pub reset_button_id: String,
    pub modal_id: String,
    pub modal_open_id: String,
    pub modal_close_id: String,
    pub busy_root_id: String,
    pub storage_key: String,
    pub dark_class: String,
    pub hidden_class: String,
    pub flash_color: String,
    pub flash_ms: i32,
    pub fade_ms: i32,
    /// Rewrite `$`, `,` and `%` out of the values right before submitting.
    pub strip_decorations_on_submit: bool,
    pub fields: Vec<FieldSpec>,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            form_id: "loanForm".into(),
            results_id: "results".into(),
            theme_toggle_id: "theme-toggle".into(),
            export_button_id: "export-report".into(),
            reset_button_id: "reset-button".into(),
            modal_id: "legal-modal".into(),
            modal_open_id: "legal-open".into(),
            modal_close_id: "legal-close".into(),
            busy_root_id: "busy-overlay".into(),
            storage_key: "theme".into(),
            dark_class: "dark-mode".into(),
            hidden_class: "hidden".into(),
            flash_color: "#fff9c4".into(),
            flash_ms: 300,
            fade_ms: 200,
            strip_decorations_on_submit: false,
            fields: loan_fields(),
        }
    }
}

impl EnhancerConfig {
    pub fn from_json(raw: &str) -> Result<Self, EnhancerError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }
}
