// filepath: src/config_watch.rs
use crate::config::InkConfig;
use calloop::channel::Sender;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;

/// Watch the config directory and forward filesystem events into the
/// calloop channel. The returned watcher must be kept alive.
pub fn setup_config_watcher(
    tx: Sender<notify::Event>,
) -> Result<RecommendedWatcher, Box<dyn std::error::Error>> {
    let config_path = InkConfig::get_config_path();
    let parent = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        notify::Config::default(),
    )?;
    watcher.watch(&parent, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
