//! Browser-side enhancement layer for the server-rendered loan amortization form.
//!
//! The normalization, validation and chrome logic is plain Rust and is tested
//! natively. The DOM bindings that attach it to a live page only exist on
//! `wasm32`.

pub mod chrome;
pub mod config;
pub mod controller;
pub mod error;
pub mod field;
pub mod locale;
pub mod normalizer;
pub mod theme;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use chrome::{ExportPlan, PageChrome, ResultsState, Reveal};
pub use config::{EnhancerConfig, FieldSpec};
pub use controller::{FormController, SubmitOutcome};
pub use error::EnhancerError;
pub use field::{FieldEvent, FieldState};
pub use locale::Language;
pub use normalizer::FieldKind;
pub use theme::{MemoryStore, PreferenceStore, Theme, ThemeSettings};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global `tracing` subscriber once. Browser builds log to the
/// developer console.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::new("loan_form_frontend=info");

        #[cfg(target_arch = "wasm32")]
        let installed = fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .without_time()
            .with_writer(dom::ConsoleWriter::default)
            .try_init();

        #[cfg(not(target_arch = "wasm32"))]
        let installed = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();

        if installed.is_ok() {
            tracing::info!("loan form tracing initialized");
        }
    });
}

/// Entry point for the browser build: wires the enhancer onto the current page.
#[cfg(target_arch = "wasm32")]
pub fn start() {
    init_tracing();
    if let Err(err) = dom::boot() {
        tracing::error!(error = %err, "loan form enhancer did not start");
    }
}
