#[cfg(target_arch = "wasm32")]
fn main() {
    loan_form_frontend::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    loan_form_frontend::init_tracing();
    tracing::warn!("the loan form enhancer only runs in the browser; build for wasm32");
}
