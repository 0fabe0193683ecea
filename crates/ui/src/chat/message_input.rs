use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
    label::Label,
    v_flex,
};

use crate::chat::events::{DraftChanged, Submit};

pub const COMPOSER_PLACEHOLDER: &str = "Ask Nexo anything...";
pub const COMPOSER_DISCLAIMER: &str = "Nexo is an AI assistant. Responses may vary.";

const COMPOSER_MAX_WIDTH: Pixels = px(768.);

/// Single-line composer. The draft is mirrored into the session on every edit.
pub struct MessageInput {
    input_state: Entity<InputState>,
    in_flight: bool,
}

impl EventEmitter<Submit> for MessageInput {}
impl EventEmitter<DraftChanged> for MessageInput {}

impl MessageInput {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state = cx.new(|cx| InputState::new(window, cx).placeholder(COMPOSER_PLACEHOLDER));

        cx.subscribe_in(
            &input_state,
            window,
            |this, state, event: &InputEvent, _window, cx| match event {
                InputEvent::Change { .. } => {
                    let text = state.read(cx).value().to_string();
                    cx.emit(DraftChanged::new(text));
                    cx.notify();
                }
                InputEvent::PressEnter { .. } => this.request_submit(cx),
                _ => {}
            },
        )
        .detach();

        Self {
            input_state,
            in_flight: false,
        }
    }

    pub fn set_in_flight(&mut self, in_flight: bool, cx: &mut Context<Self>) {
        self.in_flight = in_flight;
        cx.notify();
    }

    pub fn clear(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.set_value("", window, cx);
        });
        cx.notify();
    }

    fn can_send(&self, cx: &App) -> bool {
        !self.in_flight && !self.input_state.read(cx).value().trim().is_empty()
    }

    fn request_submit(&mut self, cx: &mut Context<Self>) {
        if self.can_send(cx) {
            cx.emit(Submit);
        }
    }
}

impl Render for MessageInput {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let send_disabled = !self.can_send(cx);

        v_flex()
            .w_full()
            .bg(theme.background)
            .p_4()
            .child(
                v_flex()
                    .w_full()
                    .max_w(COMPOSER_MAX_WIDTH)
                    .mx_auto()
                    .gap_2()
                    .child(
                        h_flex()
                            .w_full()
                            .gap_2()
                            .items_center()
                            .px_3()
                            .py_2()
                            .rounded_xl()
                            .border_1()
                            .border_color(theme.border)
                            .bg(theme.secondary)
                            .child(Input::new(&self.input_state).flex_1())
                            .child(
                                Button::new("send")
                                    .small()
                                    .primary()
                                    .icon(IconName::ArrowUp)
                                    .disabled(send_disabled)
                                    .on_click(cx.listener(|this, _, _window, cx| {
                                        this.request_submit(cx);
                                    })),
                            ),
                    )
                    .child(
                        h_flex().w_full().justify_center().child(
                            Label::new(COMPOSER_DISCLAIMER)
                                .text_xs()
                                .text_color(theme.muted_foreground.opacity(0.6)),
                        ),
                    ),
            )
    }
}
