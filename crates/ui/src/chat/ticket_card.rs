use gpui::*;
use gpui_component::{ActiveTheme, Icon, IconName, h_flex, label::Label, v_flex};
use nexo_chat::presenter::{
    TICKET_ISSUE_LABEL, TICKET_PRIORITY_LABEL, TICKET_USER_LABEL, TicketPresentation,
};
use nexo_chat::PriorityStyle;

const CARD_MAX_WIDTH: Pixels = px(384.);

fn priority_color(style: PriorityStyle, cx: &App) -> Hsla {
    let theme = cx.theme();
    match style {
        PriorityStyle::Critical => theme.danger,
        PriorityStyle::Login => theme.warning,
        PriorityStyle::Normal => theme.success,
    }
}

fn field_label(text: &'static str, cx: &App) -> impl IntoElement {
    Label::new(text.to_uppercase())
        .text_xs()
        .text_color(cx.theme().muted_foreground)
}

/// Inline card shown in place of a text body when a ticket was logged.
pub fn render_ticket_card(ticket: &TicketPresentation, cx: &App) -> AnyElement {
    let theme = cx.theme();
    let accent = priority_color(ticket.priority_style, cx);
    let synced = theme.success;

    v_flex()
        .max_w(CARD_MAX_WIDTH)
        .mt_2()
        .mb_4()
        .rounded_xl()
        .overflow_hidden()
        .border_1()
        .border_color(theme.border)
        .bg(theme.secondary)
        .child(
            h_flex()
                .px_4()
                .py_3()
                .items_center()
                .justify_between()
                .bg(theme.muted)
                .border_b_1()
                .border_color(theme.border)
                .child(
                    h_flex()
                        .gap_2()
                        .items_center()
                        .child(Icon::new(IconName::Copy).size(px(16.)).text_color(synced))
                        .child(Label::new(ticket.header).text_sm()),
                )
                .child(Icon::new(IconName::Check).size(px(16.)).text_color(synced)),
        )
        .child(
            v_flex()
                .p_4()
                .gap_3()
                .child(
                    v_flex()
                        .gap_1()
                        .child(field_label(TICKET_ISSUE_LABEL, cx))
                        .child(Label::new(ticket.issue.clone()).text_sm()),
                )
                .child(
                    h_flex()
                        .gap_3()
                        .child(
                            v_flex()
                                .flex_1()
                                .gap_1()
                                .child(field_label(TICKET_PRIORITY_LABEL, cx))
                                .child(
                                    div()
                                        .px_2()
                                        .py_1()
                                        .rounded_md()
                                        .border_1()
                                        .border_color(accent.opacity(0.2))
                                        .bg(accent.opacity(0.1))
                                        .text_xs()
                                        .text_color(accent)
                                        .child(ticket.priority.clone()),
                                ),
                        )
                        .child(
                            v_flex()
                                .flex_1()
                                .gap_1()
                                .child(field_label(TICKET_USER_LABEL, cx))
                                .child(
                                    h_flex()
                                        .gap_1()
                                        .items_center()
                                        .text_sm()
                                        .text_color(theme.muted_foreground)
                                        .child(Icon::new(IconName::CircleUser).size(px(12.)))
                                        .child(ticket.submitter.clone()),
                                ),
                        ),
                )
                .child(
                    h_flex()
                        .pt_2()
                        .items_center()
                        .justify_between()
                        .border_t_1()
                        .border_color(theme.border)
                        .text_xs()
                        .text_color(theme.muted_foreground)
                        .child(ticket.reference.clone())
                        .child(
                            h_flex()
                                .gap_1()
                                .items_center()
                                .child(Icon::new(IconName::Check).size(px(10.)))
                                .child(ticket.status),
                        ),
                ),
        )
        .into_any_element()
}
