use gpui::*;
use gpui_component::Root;
use gpui_sortable::SortableConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sortable_story::fruit_list::FruitListExample;

const CONFIG_ENV: &str = "SORTABLE_CONFIG";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config();
    let app = Application::new();

    app.run(move |cx| {
        gpui_component::init(cx);
        cx.activate(true);

        cx.spawn(async move |cx| {
            cx.open_window(
                WindowOptions {
                    titlebar: Some(TitlebarOptions {
                        title: Some("Sortable Fruits".into()),
                        appears_transparent: false,
                        traffic_light_position: None,
                    }),
                    ..Default::default()
                },
                |window, cx| {
                    let view = FruitListExample::view(config, window, cx);
                    cx.new(|cx| Root::new(view, window, cx))
                },
            )?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });
}

fn load_config() -> SortableConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return SortableConfig::default();
    };
    match SortableConfig::load(&path) {
        Ok(config) => {
            info!(%path, ?config, "loaded sortable config");
            config
        }
        Err(err) => {
            warn!(%path, "falling back to default sortable config: {err:#}");
            SortableConfig::default()
        }
    }
}
