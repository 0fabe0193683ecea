use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    list::ListItem,
    v_flex,
};
use nexo_chat::navigation::{BRAND_NAME, NEW_CHAT_LABEL, RECENT_HEADING};
use nexo_chat::presenter::BRAND_INITIAL;
use nexo_chat::{NavigationAction, NavigationPanel};

use crate::chat::events::NavigationChanged;

pub const SIDEBAR_WIDTH: f32 = 256.0;

/// Decorative navigation panel: brand, placeholder history and footer actions.
pub struct ChatSidebar {
    panel: NavigationPanel,
}

impl EventEmitter<NavigationChanged> for ChatSidebar {}

impl ChatSidebar {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            panel: NavigationPanel::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    pub fn toggle(&mut self, cx: &mut Context<Self>) {
        self.panel.toggle();
        self.notify_changed(cx);
    }

    fn close(&mut self, cx: &mut Context<Self>) {
        self.panel.close();
        self.notify_changed(cx);
    }

    fn notify_changed(&mut self, cx: &mut Context<Self>) {
        cx.emit(NavigationChanged {
            open: self.panel.is_open(),
        });
        cx.notify();
    }

    fn action_icon(action: NavigationAction) -> IconName {
        match action {
            NavigationAction::Settings => IconName::Settings,
            NavigationAction::LogOut => IconName::CircleX,
        }
    }

    fn render_brand(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .w_full()
            .p_6()
            .items_center()
            .justify_between()
            .child(
                h_flex()
                    .gap_2()
                    .items_center()
                    .child(
                        div()
                            .size(px(32.))
                            .rounded_lg()
                            .bg(theme.primary)
                            .text_color(theme.primary_foreground)
                            .font_weight(FontWeight::BOLD)
                            .flex()
                            .items_center()
                            .justify_center()
                            .child(BRAND_INITIAL),
                    )
                    .child(
                        Label::new(BRAND_NAME)
                            .text_xl()
                            .font_weight(FontWeight::BOLD),
                    ),
            )
            .child(
                Button::new("sidebar-close")
                    .ghost()
                    .small()
                    .icon(IconName::PanelLeftClose)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.close(cx);
                    })),
            )
    }

    fn render_recent(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .id("sidebar-recent")
            .flex_1()
            .min_h_0()
            .overflow_y_scroll()
            .px_4()
            .gap_2()
            .child(
                div().px_2().mb_2().child(
                    Label::new(RECENT_HEADING.to_uppercase())
                        .text_xs()
                        .text_color(theme.muted_foreground),
                ),
            )
            .children(
                self.panel
                    .recent_conversations()
                    .enumerate()
                    .map(|(index, title)| {
                        ListItem::new(("recent-conversation", index))
                            .w_full()
                            .px_3()
                            .py_2()
                            .rounded_lg()
                            .on_click(|_, _, _| {
                                tracing::debug!("placeholder conversation clicked");
                            })
                            .child(
                                div()
                                    .min_w_0()
                                    .truncate()
                                    .text_color(theme.muted_foreground)
                                    .child(Label::new(title)),
                            )
                    }),
            )
    }

    fn render_footer(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .w_full()
            .p_4()
            .gap_1()
            .border_t_1()
            .border_color(theme.border)
            .children(self.panel.actions().into_iter().map(|action| {
                Button::new(action.label())
                    .ghost()
                    .w_full()
                    .justify_start()
                    .icon(Self::action_icon(action))
                    .child(action.label())
                    .on_click(move |_, _, _| {
                        tracing::debug!(action = action.label(), "navigation action clicked");
                    })
            }))
    }
}

impl Render for ChatSidebar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let background = theme.secondary;
        let border = theme.border;

        v_flex()
            .size_full()
            .min_w_0()
            .overflow_hidden()
            .bg(background)
            .border_r_1()
            .border_color(border)
            .child(self.render_brand(cx))
            .child(
                div().w_full().px_4().mb_6().child(
                    Button::new("new-chat")
                        .primary()
                        .w_full()
                        .icon(IconName::Plus)
                        .child(NEW_CHAT_LABEL)
                        .on_click(|_, _, _| {
                            tracing::debug!("new chat is not available in a single-session build");
                        }),
                ),
            )
            .child(self.render_recent(cx))
            .child(self.render_footer(cx))
    }
}
