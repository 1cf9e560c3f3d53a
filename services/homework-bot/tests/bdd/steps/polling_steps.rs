//! Step definitions for polling.feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use homework_bot::api::PracticumClient;
use homework_bot::config::Credentials;
use homework_bot::notifier::Notifier;
use homework_bot::poller::{PollOutcome, Poller};
use homework_bot::telegram::TelegramTransport;
use homework_bot::BotError;

use crate::world::HomeworkBotWorld;

fn credentials() -> Credentials {
    Credentials {
        api_token: "hw-token".to_string(),
        telegram_token: "123:abc".to_string(),
        chat_id: "4242".to_string(),
    }
}

// ============================================================================
// Given steps
// ============================================================================

#[given(expr = "a watcher started at {int} with a {int} second interval")]
fn watcher_started(world: &mut HomeworkBotWorld, now: i64, interval: u64) {
    let credentials = credentials();
    let api = PracticumClient::from_credentials(
        "http://homework.test/api/statuses/",
        &credentials,
        world.servers.clone(),
    );
    let transport =
        TelegramTransport::new("http://telegram.test", &credentials, world.servers.clone());
    world.poller = Some(Poller::new(
        Arc::new(api),
        Notifier::new(Arc::new(transport)),
        Duration::from_secs(interval),
        now,
        CancellationToken::new(),
    ));
}

#[given(expr = "the homework API answers {int} with {string}")]
fn api_answers(world: &mut HomeworkBotWorld, status: u16, body: String) {
    world.servers.push_reply(status, &body);
}

#[given("the homework API is unreachable")]
fn api_unreachable(world: &mut HomeworkBotWorld) {
    world.servers.push_transport_error("connection refused");
}

#[given("the chat is unreachable")]
fn chat_unreachable(world: &mut HomeworkBotWorld) {
    *world.servers.chat_down.lock().unwrap() = true;
}

// ============================================================================
// When steps
// ============================================================================

#[when(expr = "the watcher polls once at {int}")]
async fn poll_once(world: &mut HomeworkBotWorld, now: i64) {
    let poller = world.poller.as_mut().expect("watcher not started");
    match poller.poll_once(now).await {
        Ok(outcome) => world.outcomes.push(outcome),
        Err(e) => world.fatal = Some(e),
    }
}

// ============================================================================
// Then steps
// ============================================================================

#[then(regex = r"^the chat should have received (\d+) messages?$")]
fn chat_received(world: &mut HomeworkBotWorld, count: usize) {
    let messages = world.servers.chat_messages();
    assert_eq!(messages.len(), count, "chat messages: {messages:?}");
}

#[then(expr = "chat message {int} should be {string}")]
fn chat_message_is(world: &mut HomeworkBotWorld, index: usize, expected: String) {
    let messages = world.servers.chat_messages();
    assert_eq!(messages[index - 1], expected);
}

#[then(expr = "chat message {int} should contain {string}")]
fn chat_message_contains(world: &mut HomeworkBotWorld, index: usize, fragment: String) {
    let messages = world.servers.chat_messages();
    assert!(
        messages[index - 1].contains(&fragment),
        "'{}' does not contain '{}'",
        messages[index - 1],
        fragment
    );
}

#[then(expr = "the next poll should start from {int}")]
fn next_poll_starts_from(world: &mut HomeworkBotWorld, expected: i64) {
    let poller = world.poller.as_ref().expect("watcher not started");
    assert_eq!(poller.state().last_poll_timestamp, expected);
}

#[then(expr = "the API should have been asked from {int} both times")]
fn asked_from_same_date(world: &mut HomeworkBotWorld, from_date: i64) {
    let requested = world.servers.requested_from_dates.lock().unwrap().clone();
    let expected = from_date.to_string();
    assert_eq!(requested, vec![expected.clone(), expected]);
}

#[then("the last poll should report no updates")]
fn last_poll_no_updates(world: &mut HomeworkBotWorld) {
    let outcome = world.outcomes.last().expect("no poll outcome");
    assert!(matches!(outcome, PollOutcome::NoUpdates), "{outcome:?}");
}

#[then("the last poll should have failed with a shape error")]
fn last_poll_shape_error(world: &mut HomeworkBotWorld) {
    let outcome = world.outcomes.last().expect("no poll outcome");
    assert!(
        matches!(
            outcome,
            PollOutcome::Failed {
                error: BotError::Shape(_),
                alerted: true
            }
        ),
        "{outcome:?}"
    );
}

#[then("the poll should have failed fatally")]
fn poll_failed_fatally(world: &mut HomeworkBotWorld) {
    let error = world.fatal.as_ref().expect("poll did not fail");
    assert!(matches!(error, BotError::FatalNotify(_)), "{error:?}");
    assert!(world.servers.chat_messages().is_empty());
}
