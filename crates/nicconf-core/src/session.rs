//! Session orchestration
//!
//! One session is: open the transport, wake the device, apply a command set,
//! then save / restart / verify. The transport is closed on every exit path.

use crate::menu::MenuChoice;
use crate::protocol::{
    Clock, CommandSet, ConnectionConfig, Driver, ProtocolError, SessionOutcome, Transport,
};

/// Run a full configuration session.
///
/// `open` is called once. If it fails nothing else happens; otherwise the
/// transport it returns is closed before this function returns.
pub fn run_session<T, C, F>(
    config: &ConnectionConfig,
    commands: &CommandSet,
    open: F,
    clock: C,
) -> Result<SessionOutcome, ProtocolError>
where
    T: Transport,
    C: Clock,
    F: FnOnce(&ConnectionConfig) -> Result<T, ProtocolError>,
{
    let transport = open(config)?;
    let mut driver = Driver::new(transport, clock, config);

    let result = drive(&mut driver, commands);
    if let Err(e) = &result {
        tracing::error!("Session aborted: {e}");
    }
    driver.close();
    result
}

fn drive<T: Transport, C: Clock>(
    driver: &mut Driver<T, C>,
    commands: &CommandSet,
) -> Result<SessionOutcome, ProtocolError> {
    driver.wake()?;
    driver.play(commands)?;
    driver.finalize()
}

/// Act on a menu choice. `Exit` returns `Ok(None)` without calling `open`.
pub fn run_choice<T, C, F>(
    choice: MenuChoice,
    config: &ConnectionConfig,
    open: F,
    clock: C,
) -> Result<Option<SessionOutcome>, ProtocolError>
where
    T: Transport,
    C: Clock,
    F: FnOnce(&ConnectionConfig) -> Result<T, ProtocolError>,
{
    match choice {
        MenuChoice::Exit => Ok(None),
        MenuChoice::Configure(profile) => {
            let commands = profile.commands()?;
            run_session(config, &commands, open, clock).map(Some)
        }
    }
}
