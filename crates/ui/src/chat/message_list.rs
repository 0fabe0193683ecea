use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{ActiveTheme, Icon, IconName, h_flex, label::Label, v_flex};
use nexo_chat::{Avatar, MessagePresentation, Turn};

use crate::chat::scroll_manager::ScrollManager;
use crate::chat::ticket_card::render_ticket_card;

const CONTENT_MAX_WIDTH: Pixels = px(768.);
const AVATAR_SIZE: Pixels = px(32.);
const TYPING_DOT_SIZE: Pixels = px(8.);
const EMPTY_BODY_PLACEHOLDER: &str = "(empty response)";

/// Conversation transcript. Rebuilt from the session every time it changes.
pub struct MessageList {
    rows: Vec<MessagePresentation>,
    in_flight: bool,
    scroll_manager: ScrollManager,
}

impl MessageList {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            rows: Vec::new(),
            in_flight: false,
            scroll_manager: ScrollManager::new(),
        }
    }

    pub fn set_turns(&mut self, turns: &[Turn], in_flight: bool, cx: &mut Context<Self>) {
        self.rows = turns.iter().map(MessagePresentation::from_turn).collect();
        self.in_flight = in_flight;
        // The typing row counts so the indicator itself is brought into view.
        self.scroll_manager
            .observe_row_count(self.rows.len() + usize::from(in_flight));
        cx.notify();
    }

    fn render_avatar(avatar: Avatar, cx: &App) -> AnyElement {
        let theme = cx.theme();
        let circle = div()
            .flex_shrink_0()
            .size(AVATAR_SIZE)
            .rounded_full()
            .flex()
            .items_center()
            .justify_center();

        match avatar {
            Avatar::User => circle
                .bg(theme.accent.opacity(0.2))
                .child(
                    Icon::new(IconName::CircleUser)
                        .size(px(18.))
                        .text_color(theme.accent_foreground),
                )
                .into_any_element(),
            Avatar::Brand(initial) => circle
                .bg(theme.primary)
                .text_color(theme.primary_foreground)
                .text_xs()
                .font_weight(FontWeight::BOLD)
                .child(initial)
                .into_any_element(),
        }
    }

    fn render_row(&self, index: usize, row: &MessagePresentation, cx: &App) -> AnyElement {
        let theme = cx.theme();
        let is_user = row.is_user();

        let header = h_flex()
            .gap_2()
            .items_center()
            .text_xs()
            .text_color(theme.muted_foreground)
            .when(is_user, |header| header.flex_row_reverse())
            .child(Label::new(row.speaker).text_xs())
            .child(Label::new(row.timestamp.clone()).text_xs());

        let body = if row.has_body() {
            Some(
                v_flex()
                    .gap_2()
                    .p_4()
                    .rounded_2xl()
                    .text_sm()
                    .map(|bubble| {
                        if is_user {
                            bubble.bg(theme.accent).text_color(theme.accent_foreground)
                        } else {
                            bubble
                                .bg(theme.secondary)
                                .border_1()
                                .border_color(theme.border)
                                .text_color(theme.foreground)
                        }
                    })
                    .children(row.paragraphs.iter().map(|line| div().child(line.clone()))),
            )
        } else if row.ticket.is_none() {
            Some(
                v_flex().child(
                    Label::new(EMPTY_BODY_PLACEHOLDER)
                        .text_sm()
                        .text_color(theme.muted_foreground),
                ),
            )
        } else {
            None
        };

        h_flex()
            .id(("message-row", index))
            .w_full()
            .max_w(CONTENT_MAX_WIDTH)
            .mx_auto()
            .gap_4()
            .p_4()
            .items_start()
            .when(is_user, |row| row.flex_row_reverse())
            .child(Self::render_avatar(row.avatar, cx))
            .child(
                v_flex()
                    .flex_1()
                    .min_w_0()
                    .gap_2()
                    .when(is_user, |column| column.items_end())
                    .child(header)
                    .when_some(row.ticket.as_ref(), |column, ticket| {
                        column.child(render_ticket_card(ticket, cx))
                    })
                    .when_some(body, |column, body| column.child(body)),
            )
            .into_any_element()
    }

    fn render_typing_indicator(cx: &App) -> AnyElement {
        let theme = cx.theme();
        let dot = || {
            div()
                .size(TYPING_DOT_SIZE)
                .rounded_full()
                .bg(theme.muted_foreground)
        };

        h_flex()
            .id("typing-indicator")
            .w_full()
            .max_w(CONTENT_MAX_WIDTH)
            .mx_auto()
            .gap_4()
            .p_4()
            .items_center()
            .child(Self::render_avatar(Avatar::Brand(nexo_chat::presenter::BRAND_INITIAL), cx))
            .child(h_flex().gap_1().items_center().child(dot()).child(dot()).child(dot()))
            .into_any_element()
    }
}

impl Render for MessageList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.scroll_manager.apply_pending_scroll();

        let app: &App = cx;
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.render_row(index, row, app))
            .collect::<Vec<_>>();

        v_flex().size_full().min_h_0().child(
            v_flex()
                .id("message-list")
                .size_full()
                .overflow_y_scroll()
                .track_scroll(self.scroll_manager.handle())
                .px_4()
                .py_3()
                .gap_2()
                .children(rows)
                .when(self.in_flight, |list| {
                    list.child(Self::render_typing_indicator(app))
                }),
        )
    }
}
