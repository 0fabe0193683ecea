use std::path::PathBuf;
use std::sync::Arc;

use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex, v_flex,
};
use nexo_llm::ModelGateway;

use crate::chat::sidebar::SIDEBAR_WIDTH;
use crate::chat::{ChatSidebar, ChatView, NavigationChanged};

pub const WINDOW_TITLE: &str = "Nexo";
pub const HEADER_TITLE: &str = "Nexo AI Support";

/// Returns the default themes directory path.
pub fn default_themes_path() -> PathBuf {
    PathBuf::from("./themes")
}

#[cfg(target_os = "macos")]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 78.0;
#[cfg(not(target_os = "macos"))]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 16.0;
#[cfg(target_os = "windows")]
const WINDOW_TOOLBAR_RIGHT_SAFE_PADDING: f32 = 120.0;
#[cfg(not(target_os = "windows"))]
const WINDOW_TOOLBAR_RIGHT_SAFE_PADDING: f32 = 16.0;

fn window_toolbar_height(window: &Window) -> Pixels {
    (2.0 * window.rem_size()).max(px(40.0))
}

/// Width of the navigation panel container. The panel stays mounted while closed.
pub fn sidebar_width(open: bool) -> f32 {
    if open { SIDEBAR_WIDTH } else { 0.0 }
}

gpui::actions!(shell, [ToggleSidebar, Quit]);

/// Root layout: navigation panel on the left, header and conversation on the right.
pub struct ChatAppShell {
    sidebar: Entity<ChatSidebar>,
    chat_view: Entity<ChatView>,
    title_bar_should_move: bool,
}

impl ChatAppShell {
    pub fn new(gateway: Arc<dyn ModelGateway>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let sidebar = cx.new(ChatSidebar::new);
        let chat_view = cx.new(|cx| ChatView::new(gateway, window, cx));

        cx.subscribe(&sidebar, |_, _, event: &NavigationChanged, cx| {
            tracing::debug!(open = event.open, "navigation panel changed");
            cx.notify();
        })
        .detach();

        Self {
            sidebar,
            chat_view,
            title_bar_should_move: false,
        }
    }

    fn toggle_sidebar(&mut self, cx: &mut Context<Self>) {
        self.sidebar.update(cx, |sidebar, cx| sidebar.toggle(cx));
    }

    fn render_top_bar(
        &self,
        window: &Window,
        toolbar_height: Pixels,
        sidebar_open: bool,
        cx: &Context<Self>,
    ) -> impl IntoElement {
        let theme = cx.theme();
        let toggle_icon = if sidebar_open {
            IconName::PanelLeftClose
        } else {
            IconName::PanelLeftOpen
        };

        h_flex()
            .id("app-top-bar")
            .window_control_area(WindowControlArea::Drag)
            .on_mouse_down_out(cx.listener(|this, _, _window, _cx| {
                this.title_bar_should_move = false;
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = false;
                }),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = true;
                }),
            )
            .on_mouse_move(cx.listener(|this, _, window, _cx| {
                if this.title_bar_should_move {
                    this.title_bar_should_move = false;
                    window.start_window_move();
                }
            }))
            .w_full()
            .h(toolbar_height)
            .flex_shrink_0()
            .pl(px(WINDOW_TOOLBAR_LEFT_SAFE_PADDING))
            .pr(px(WINDOW_TOOLBAR_RIGHT_SAFE_PADDING))
            .gap_2()
            .items_center()
            .bg(theme.background.opacity(0.8))
            .border_b_1()
            .border_color(theme.border)
            .child(
                Button::new("sidebar-toggle")
                    .ghost()
                    .small()
                    .icon(toggle_icon)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.toggle_sidebar(cx);
                    })),
            )
            .child(
                h_flex()
                    .id("app-header-title")
                    .flex_1()
                    .gap_2()
                    .items_center()
                    .text_sm()
                    .text_color(theme.muted_foreground)
                    .child(HEADER_TITLE),
            )
            .when(
                cfg!(target_os = "linux") && window.window_controls().window_menu,
                |title_bar| {
                    title_bar.on_mouse_down(MouseButton::Right, |event, window, _| {
                        window.show_window_menu(event.position);
                    })
                },
            )
            .child(self.render_linux_window_controls(window, cx))
    }

    fn render_linux_window_controls(&self, window: &Window, cx: &Context<Self>) -> AnyElement {
        #[cfg(target_os = "linux")]
        {
            let maximize_icon = if window.is_maximized() {
                IconName::WindowRestore
            } else {
                IconName::WindowMaximize
            };

            h_flex()
                .id("linux-window-controls")
                .items_center()
                // Keep clicks on the controls out of the title bar drag handlers.
                .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
                .on_mouse_down(MouseButton::Right, |_, _, cx| cx.stop_propagation())
                .gap_2()
                .ml_2()
                .child(
                    Button::new("linux-window-minimize")
                        .ghost()
                        .small()
                        .icon(IconName::WindowMinimize)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.minimize_window();
                        })),
                )
                .child(
                    Button::new("linux-window-maximize")
                        .ghost()
                        .small()
                        .icon(maximize_icon)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.zoom_window();
                        })),
                )
                .child(
                    Button::new("linux-window-close")
                        .ghost()
                        .small()
                        .icon(IconName::WindowClose)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.remove_window();
                        })),
                )
                .into_any_element()
        }

        #[cfg(not(target_os = "linux"))]
        {
            let _ = (window, cx);
            div().into_any_element()
        }
    }
}

impl Render for ChatAppShell {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let toolbar_height = window_toolbar_height(window);
        let sidebar_open = self.sidebar.read(cx).is_open();

        h_flex()
            .id("app-shell")
            .size_full()
            .bg(theme.background)
            .text_color(theme.foreground)
            .on_action(cx.listener(|this, _: &ToggleSidebar, _window, cx| {
                this.toggle_sidebar(cx);
            }))
            .child(
                div()
                    .id("sidebar-container")
                    .h_full()
                    .flex_shrink_0()
                    .w(px(sidebar_width(sidebar_open)))
                    .overflow_hidden()
                    .child(self.sidebar.clone()),
            )
            .child(
                v_flex()
                    .id("main-content")
                    .flex_1()
                    .h_full()
                    .min_w_0()
                    .min_h_0()
                    .overflow_hidden()
                    .child(self.render_top_bar(window, toolbar_height, sidebar_open, cx))
                    .child(
                        div()
                            .flex_1()
                            .min_h_0()
                            .child(self.chat_view.clone()),
                    ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_sidebar_reserves_no_width() {
        assert_eq!(sidebar_width(true), SIDEBAR_WIDTH);
        assert_eq!(sidebar_width(false), 0.0);
    }

    #[test]
    fn themes_are_loaded_from_working_directory() {
        assert_eq!(default_themes_path(), PathBuf::from("./themes"));
    }
}
