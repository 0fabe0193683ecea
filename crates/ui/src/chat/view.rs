use std::sync::Arc;

use gpui::*;
use gpui_component::{ActiveTheme, v_flex};
use gpui_tokio_bridge::Tokio;
use nexo_chat::SessionState;
use nexo_llm::{GatewayError, GatewayResult, ModelGateway, ModelReply};

use crate::chat::events::{DraftChanged, Submit};
use crate::chat::{MessageInput, MessageList};

/// Coordinates the composer, the transcript and the model gateway.
///
/// Owns the only [`SessionState`]. The gateway call runs on the tokio runtime;
/// both ends of the cycle run here on the UI thread.
pub struct ChatView {
    message_list: Entity<MessageList>,
    message_input: Entity<MessageInput>,
    session: SessionState,
    gateway: Arc<dyn ModelGateway>,
    request_task: Option<Task<()>>,
}

impl ChatView {
    pub fn new(gateway: Arc<dyn ModelGateway>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let message_list = cx.new(MessageList::new);
        let message_input = cx.new(|cx| MessageInput::new(window, cx));

        cx.subscribe(&message_input, |this, _, event: &DraftChanged, _cx| {
            this.session.set_pending_input(event.text.clone());
        })
        .detach();

        cx.subscribe_in(&message_input, window, |this, _, _event: &Submit, window, cx| {
            this.handle_submit(window, cx);
        })
        .detach();

        let mut this = Self {
            message_list,
            message_input,
            session: SessionState::new(),
            gateway,
            request_task: None,
        };
        this.sync_message_list(cx);
        this
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    fn handle_submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let Some(request) = self.session.begin_submit() else {
            return;
        };

        tracing::info!(
            gateway = self.gateway.name(),
            turn_count = self.session.turns().len(),
            "submitting message"
        );

        self.message_input.update(cx, |input, cx| {
            input.clear(window, cx);
            input.set_in_flight(true, cx);
        });
        self.sync_message_list(cx);

        let gateway = self.gateway.clone();
        let gateway_task = Tokio::spawn(cx, async move { gateway.send_message(request).await });

        self.request_task = Some(cx.spawn(async move |this, cx| {
            let outcome = match gateway_task.await {
                Ok(outcome) => outcome,
                Err(error) => {
                    tracing::error!(error = ?error, "gateway task failed to complete");
                    Err(GatewayError::Transport {
                        stage: "gateway-task-join",
                        detail: String::new(),
                    })
                }
            };

            let _ = this.update(cx, |this, cx| {
                this.finish_request(outcome, cx);
            });
        }));
        cx.notify();
    }

    fn finish_request(&mut self, outcome: GatewayResult<ModelReply>, cx: &mut Context<Self>) {
        self.request_task = None;

        if let Some(report) = self.session.complete(outcome) {
            tracing::debug!(
                kind = ?report.kind,
                appended = report.appended.len(),
                "conversation cycle finished"
            );
        }

        let in_flight = self.session.is_in_flight();
        self.message_input.update(cx, |input, cx| {
            input.set_in_flight(in_flight, cx);
        });
        self.sync_message_list(cx);
        cx.notify();
    }

    fn sync_message_list(&mut self, cx: &mut Context<Self>) {
        let turns = self.session.turns();
        let in_flight = self.session.is_in_flight();
        self.message_list.update(cx, |list, cx| {
            list.set_turns(turns, in_flight, cx);
        });
    }
}

impl Render for ChatView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .id("chat-view")
            .relative()
            .size_full()
            .min_h_0()
            .overflow_hidden()
            .bg(theme.background)
            .child(
                div()
                    .id("chat-view-message-list")
                    .flex_1()
                    .min_h_0()
                    .child(self.message_list.clone()),
            )
            .child(
                div()
                    .id("chat-view-message-input")
                    .flex_shrink_0()
                    .w_full()
                    .border_t_1()
                    .border_color(theme.border)
                    .child(self.message_input.clone()),
            )
    }
}
