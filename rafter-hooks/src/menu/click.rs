//! Close after a click inside the menu.

use std::sync::Arc;

use log::trace;
use rafter::{Callback, Hooks};
use tuidom::DomEvent;

use crate::latest::UseLatest;
use crate::menu::EventHandler;

#[derive(Clone)]
pub struct MenuClick {
    pub visible: bool,
    /// Runs first. Calling `prevent_default` on the event keeps the menu open.
    pub on_click: Option<EventHandler>,
    pub on_request_close: Callback,
}

pub trait UseMenuClick {
    fn use_menu_click(&mut self, config: MenuClick) -> EventHandler;
}

impl UseMenuClick for Hooks<'_> {
    fn use_menu_click(&mut self, config: MenuClick) -> EventHandler {
        let latest = self.use_latest(config);
        self.use_memo((), move || {
            Arc::new(move |event: &DomEvent| {
                let config = latest.get();
                if let Some(handler) = &config.on_click {
                    handler(event);
                }
                if !config.visible || event.default_prevented() {
                    return;
                }
                trace!("Click in menu on {:?}", event.target());
                config.on_request_close.emit();
            }) as EventHandler
        })
    }
}
