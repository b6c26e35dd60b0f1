fn main() {
    dioxus::logger::initialize_default();
    tracing::info!("Starting course catalog (web)");
    dioxus::launch(ui::App);
}
