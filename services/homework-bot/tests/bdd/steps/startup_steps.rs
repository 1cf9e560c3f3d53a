//! Step definitions for startup.feature

use cucumber::{given, then, when};

use homework_bot::{BotError, Config};

use crate::world::HomeworkBotWorld;

#[given("an empty configuration")]
fn empty_configuration(world: &mut HomeworkBotWorld) {
    world.config = Some(Config::default());
}

#[given(expr = "a configuration with chat id {string}")]
fn configuration_with_chat_id(world: &mut HomeworkBotWorld, chat_id: String) {
    let mut config = Config::default();
    config.telegram.chat_id = Some(chat_id);
    world.config = Some(config);
}

#[given(expr = "the environment variable {string} is {string}")]
fn environment_variable(world: &mut HomeworkBotWorld, key: String, value: String) {
    world.environment.push((key, value));
}

#[when("the credentials are checked")]
fn credentials_checked(world: &mut HomeworkBotWorld) {
    let mut config = world.config.clone().unwrap_or_default();
    let environment = world.environment.clone();
    config.resolve_secrets_with(|key| {
        environment
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    });
    world.startup_result = Some(config.credentials());
}

#[then(expr = "startup should succeed with chat id {string}")]
fn startup_succeeds(world: &mut HomeworkBotWorld, chat_id: String) {
    let result = world.startup_result.as_ref().expect("no startup result");
    let credentials = result.as_ref().unwrap();
    assert_eq!(credentials.chat_id, chat_id);
}

#[then(expr = "startup should fail mentioning {string}")]
fn startup_fails(world: &mut HomeworkBotWorld, fragment: String) {
    let result = world.startup_result.as_ref().expect("no startup result");
    match result {
        Err(err @ BotError::Startup(_)) => {
            assert!(err.to_string().contains(&fragment), "{err}")
        }
        other => panic!("expected startup error, got {other:?}"),
    }
}
