fn main() {
    dioxus::logger::initialize_default();
    tracing::info!("Starting course catalog (desktop)");
    dioxus::launch(ui::App);
}
