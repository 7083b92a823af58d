//! First-match command dispatch.
//!
//! Handlers are checked in registration order; the first whose `matches`
//! returns true wins. An unshadowable catch-all answers everything else.


use async_trait::async_trait;
use myna_core::error::MynaError;
use myna_telegram::{Client, Message};
use rand::Rng;

/// Control outcome of handling one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep processing the batch.
    Continue,
    /// Stop polling after this update; graceful exit.
    Shutdown,
    /// Terminate the process immediately.
    Abort,
}

/// One command: a match predicate and the action it triggers.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Short name for log lines.
    fn name(&self) -> &str;

    fn matches(&self, message: &Message) -> bool;

    async fn handle(&self, api: &Client, message: &Message) -> Result<Outcome, MynaError>;
}

/// Ordered first-match router. Registration order is match priority; the
/// fallback sits outside the list and cannot be shadowed.
pub struct Router {
    handlers: Vec<Box<dyn Handler>>,
    fallback: DefaultHandler,
}

impl Router {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            fallback: DefaultHandler,
        }
    }

    /// The built-in command set, in the order the bot has always matched it.
    pub fn with_defaults() -> Self {
        let mut router = Self::new();
        router.register(Box::new(RandomHandler));
        router.register(Box::new(StaticHandler::new("/weather", "Winter Is Coming")));
        router.register(Box::new(StaticHandler::new(
            "/styleguide",
            "A funny joke about review",
        )));
        router.register(Box::new(CrashHandler));
        router.register(Box::new(StopHandler));
        router
    }

    pub fn register(&mut self, handler: Box<dyn Handler>) {
        self.handlers.push(handler);
    }

    /// First handler whose predicate accepts the message, else the fallback.
    pub fn dispatch(&self, message: &Message) -> &dyn Handler {
        self.handlers
            .iter()
            .find(|h| h.matches(message))
            .map(|h| h.as_ref())
            .unwrap_or(&self.fallback)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

fn text_is(message: &Message, command: &str) -> bool {
    message.text.as_deref() == Some(command)
}

/// `/random` -- replies with a uniformly random number.
pub struct RandomHandler;

#[async_trait]
impl Handler for RandomHandler {
    fn name(&self) -> &str {
        "random"
    }

    fn matches(&self, message: &Message) -> bool {
        text_is(message, "/random")
    }

    async fn handle(&self, api: &Client, message: &Message) -> Result<Outcome, MynaError> {
        let value: u64 = rand::thread_rng().gen();
        api.send_message(message.chat.id, &value.to_string(), None)
            .await?;
        Ok(Outcome::Continue)
    }
}

/// One fixed reply per fixed command.
pub struct StaticHandler {
    command: &'static str,
    reply: &'static str,
}

impl StaticHandler {
    pub fn new(command: &'static str, reply: &'static str) -> Self {
        Self { command, reply }
    }
}

#[async_trait]
impl Handler for StaticHandler {
    fn name(&self) -> &str {
        self.command.trim_start_matches('/')
    }

    fn matches(&self, message: &Message) -> bool {
        text_is(message, self.command)
    }

    async fn handle(&self, api: &Client, message: &Message) -> Result<Outcome, MynaError> {
        api.send_message(message.chat.id, self.reply, None).await?;
        Ok(Outcome::Continue)
    }
}

/// `/crash` -- requests immediate fatal termination. No reply.
pub struct CrashHandler;

#[async_trait]
impl Handler for CrashHandler {
    fn name(&self) -> &str {
        "crash"
    }

    fn matches(&self, message: &Message) -> bool {
        text_is(message, "/crash")
    }

    async fn handle(&self, _api: &Client, _message: &Message) -> Result<Outcome, MynaError> {
        Ok(Outcome::Abort)
    }
}

/// `/stop` -- requests graceful shutdown. No reply.
pub struct StopHandler;

#[async_trait]
impl Handler for StopHandler {
    fn name(&self) -> &str {
        "stop"
    }

    fn matches(&self, message: &Message) -> bool {
        text_is(message, "/stop")
    }

    async fn handle(&self, _api: &Client, _message: &Message) -> Result<Outcome, MynaError> {
        Ok(Outcome::Shutdown)
    }
}

/// Catch-all for unrecognized messages.
pub struct DefaultHandler;

#[async_trait]
impl Handler for DefaultHandler {
    fn name(&self) -> &str {
        "default"
    }

    fn matches(&self, _message: &Message) -> bool {
        true
    }

    async fn handle(&self, api: &Client, message: &Message) -> Result<Outcome, MynaError> {
        let reply = format!(
            "Sorry, your message is not recognized: {}",
            message.text_or_empty()
        );
        api.send_message(message.chat.id, &reply, None).await?;
        Ok(Outcome::Continue)
    }
}
