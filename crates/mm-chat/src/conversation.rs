use mm_core::CoreError;
use mm_core::entities::{InstrumentRef, Message, Toggled, Watchlist, WatchlistItem};
use mm_core::enums::{MessageRole, Timeframe, ViewMode};
use mm_core::ids::{PREFIX_MESSAGE, PREFIX_SESSION, generate_id, sequence_id};
use mm_gateway::{GatewayError, ModelGateway, ModelReply};
use mm_parser::ChartBlock;
use mm_parser::prompts::watchlist_analysis_prompt;
use mm_parser::response::parse_response;
use mm_store::WatchlistStore;

use crate::send::{FAILURE_TEXT, PendingSend, SendOrigin, SendOutcome};

/// Default number of prior turns handed to the model.
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// State of one session.
pub struct Conversation<S: WatchlistStore> {
    session_id: String,
    messages: Vec<Message>,
    in_flight: bool,
    view: ViewMode,
    watchlist: Watchlist,
    store: S,
    next_seq: u64,
    history_limit: usize,
}

impl<S: WatchlistStore> Conversation<S> {
    /// Start a session, restoring the watchlist from `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        let watchlist = store.load();
        tracing::debug!(items = watchlist.len(), "watchlist restored");
        Self {
            session_id: generate_id(PREFIX_SESSION),
            messages: Vec::new(),
            in_flight: false,
            view: ViewMode::Welcome,
            watchlist,
            store,
            next_seq: 0,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// Random id of this session. Message ids restart in every session;
    /// the pair is unique across processes.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub const fn view(&self) -> ViewMode {
        self.view
    }

    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub const fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Most recent settled model message.
    #[must_use]
    pub fn latest_reply(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Model && !m.is_pending())
    }

    /// Instrument of the most recent message that carries one.
    #[must_use]
    pub fn latest_instrument(&self) -> Option<&InstrumentRef> {
        self.messages.iter().rev().find_map(Message::instrument)
    }

    /// Most recent message that carries chart markup.
    #[must_use]
    pub fn latest_chart_message(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.chart_markup().is_some())
    }

    /// Chart of message `id`, with the instrument it was drawn for.
    ///
    /// Falls back to the latest instrument in the conversation when the
    /// message itself carries none.
    #[must_use]
    pub fn chart_for(&self, id: &str) -> Option<ChartBlock> {
        let message = self.message(id)?;
        let markup = message.chart_markup()?;
        let instrument = message.instrument().or_else(|| self.latest_instrument());
        Some(ChartBlock::new(markup, instrument))
    }

    /// Accept a send, or return `None` when `text` is blank or a send is
    /// already outstanding. On acceptance the view switches to chat and the
    /// user turn plus a pending placeholder are appended.
    pub fn begin_send(&mut self, text: &str, origin: SendOrigin) -> Option<PendingSend> {
        if text.trim().is_empty() {
            return None;
        }
        if self.in_flight {
            tracing::debug!("send rejected: request already in flight");
            return None;
        }

        let history = self.history_snapshot();

        if self.view.can_transition_to(ViewMode::Chat) {
            self.view = ViewMode::Chat;
        }
        let user = Message::user(self.next_id(), text);
        let placeholder = Message::placeholder(self.next_id());
        let placeholder_id = placeholder.id.clone();
        self.messages.push(user);
        self.messages.push(placeholder);
        self.in_flight = true;

        tracing::info!(placeholder = %placeholder_id, ?origin, "send accepted");
        Some(PendingSend {
            placeholder_id,
            text: text.to_string(),
            history,
            origin,
        })
    }

    /// Settle the placeholder of `pending` with the model's result. Always
    /// clears the in-flight flag. Only the placeholder is modified.
    pub fn complete(
        &mut self,
        pending: PendingSend,
        result: Result<ModelReply, GatewayError>,
    ) -> SendOutcome {
        self.in_flight = false;
        let restore_input = pending.origin == SendOrigin::Input;

        let (settled, failed) = match result {
            Ok(reply) => {
                let parsed = parse_response(&reply.text);
                let reply = parsed.into_reply(reply.citations);
                (self.settle(&pending.placeholder_id, |m| m.resolve(reply)), false)
            }
            Err(error) => {
                tracing::error!(%error, placeholder = %pending.placeholder_id, "model request failed");
                (self.settle(&pending.placeholder_id, |m| m.fail(FAILURE_TEXT)), true)
            }
        };
        if let Err(error) = settled {
            tracing::warn!(%error, "placeholder could not be settled");
        }

        SendOutcome {
            message_id: pending.placeholder_id,
            failed,
            restore_input,
        }
    }

    /// Send `text` and wait for the answer. `None` when the send was rejected.
    pub async fn send<G>(
        &mut self,
        gateway: &G,
        text: &str,
        origin: SendOrigin,
    ) -> Option<SendOutcome>
    where
        G: ModelGateway + ?Sized,
    {
        let pending = self.begin_send(text, origin)?;
        let result = gateway.send(&pending.history, &pending.text).await;
        Some(self.complete(pending, result))
    }

    /// Send the prompt of suggested action `index` on message `message_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the message or action does not exist.
    pub async fn run_action<G>(
        &mut self,
        gateway: &G,
        message_id: &str,
        index: usize,
    ) -> Result<Option<SendOutcome>, CoreError>
    where
        G: ModelGateway + ?Sized,
    {
        let message = self.message(message_id).ok_or_else(|| CoreError::NotFound {
            entity_type: "message".to_string(),
            id: message_id.to_string(),
        })?;
        let action = message
            .suggested_actions()
            .get(index)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "action".to_string(),
                id: format!("{message_id}#{}", index + 1),
            })?;
        let prompt = action.prompt.clone();
        Ok(self.send(gateway, &prompt, SendOrigin::Action).await)
    }

    /// Ask for an analysis of watchlist entry `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if there is no entry at `index`.
    pub async fn select_watchlist<G>(
        &mut self,
        gateway: &G,
        index: usize,
    ) -> Result<Option<SendOutcome>, CoreError>
    where
        G: ModelGateway + ?Sized,
    {
        let item = self.watchlist.get(index).ok_or_else(|| CoreError::NotFound {
            entity_type: "watchlist item".to_string(),
            id: (index + 1).to_string(),
        })?;
        let prompt = watchlist_analysis_prompt(item);
        Ok(self.send(gateway, &prompt, SendOrigin::Watchlist).await)
    }

    /// Ask the model to redraw the chart of `message_id` in `target`.
    ///
    /// `Ok(None)` when `target` is already shown, no symbol is known, or the
    /// send was rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the message has no chart.
    pub async fn toggle_chart_timeframe<G>(
        &mut self,
        gateway: &G,
        message_id: &str,
        target: Timeframe,
    ) -> Result<Option<SendOutcome>, CoreError>
    where
        G: ModelGateway + ?Sized,
    {
        let chart = self.chart_for(message_id).ok_or_else(|| CoreError::NotFound {
            entity_type: "chart".to_string(),
            id: message_id.to_string(),
        })?;
        let Some(prompt) = chart.toggle_prompt(target) else {
            tracing::debug!(current = %chart.timeframe, %target, "chart toggle ignored");
            return Ok(None);
        };
        Ok(self.send(gateway, &prompt, SendOrigin::Action).await)
    }

    /// Add or remove `symbol` and persist the list.
    pub fn toggle_watchlist(&mut self, symbol: &str, name: &str) -> Toggled {
        let toggled = self.watchlist.toggle(symbol, name);
        self.persist();
        toggled
    }

    /// Remove the entry with `id` and persist the list.
    pub fn remove_watchlist(&mut self, id: &str) -> Option<WatchlistItem> {
        let removed = self.watchlist.remove_by_id(id);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    fn persist(&mut self) {
        if let Err(error) = self.store.save(&self.watchlist) {
            tracing::warn!(%error, "watchlist could not be saved");
        }
    }

    fn history_snapshot(&self) -> Vec<Message> {
        let settled: Vec<&Message> = self.messages.iter().filter(|m| !m.is_pending()).collect();
        let skip = settled.len().saturating_sub(self.history_limit);
        settled[skip..].iter().map(|&m| m.clone()).collect()
    }

    fn settle<F>(&mut self, id: &str, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Message) -> Result<(), CoreError>,
    {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "message".to_string(),
                id: id.to_string(),
            })?;
        apply(message)
    }

    fn next_id(&mut self) -> String {
        self.next_seq += 1;
        sequence_id(PREFIX_MESSAGE, self.next_seq)
    }
}
