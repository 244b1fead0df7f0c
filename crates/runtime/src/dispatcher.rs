//! Query → serialise → execute pipeline around the authoritative park.
//!
//! The dispatcher owns the [`GameState`] and is the only place actions are
//! executed. Every action is queried first; only a successful query is
//! executed, and only a successful execution is paid for, logged and
//! replicated.

use tracing::{debug, warn};

use park_core::{
    Action, ActionFlags, ActionResult, CommandFlags, GameAction, GameConfig, GameEnv, GameState,
    Money, NetworkMode, PlayerId, SceneryOracle, StateChecksum, Status, StringId,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::queue::NetworkActionQueue;
use crate::repository::{ACTION_LOG_FILE, ActionLogEntry, ActionRepository, FileActionLog};

/// Height of the surface in freshly generated parks, in height units.
pub const DEFAULT_SURFACE_HEIGHT: u8 = 14;

pub struct ActionDispatcher {
    state: GameState,
    config: GameConfig,
    scenery: Option<Box<dyn SceneryOracle>>,
    paused: bool,
    tick: u32,
    next_network_id: u32,
    queue: NetworkActionQueue,
    /// Encoded actions waiting to be sent to peers.
    outbound: Vec<Vec<u8>>,
    log: Option<Box<dyn ActionRepository>>,
    sequence: u64,
}

impl ActionDispatcher {
    pub fn new(state: GameState, config: GameConfig) -> Self {
        Self {
            state,
            config,
            scenery: None,
            paused: false,
            tick: 0,
            next_network_id: 0,
            queue: NetworkActionQueue::new(),
            outbound: Vec::new(),
            log: None,
            sequence: 0,
        }
    }

    /// Fresh flat park set up from `config`, logging to the session
    /// directory when enabled.
    ///
    /// # Errors
    ///
    /// Fails if the action log cannot be opened.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let mut state = GameState::flat(&config.game, DEFAULT_SURFACE_HEIGHT);
        state.network.mode = config.network_mode;
        state.finance.cash = config.starting_cash;

        let mut dispatcher = Self::new(state, config.game.clone());
        if config.enable_action_log {
            let dir = config
                .session_dir()
                .unwrap_or_else(|| config.resolved_data_dir().join("default"));
            let log = FileActionLog::open_or_create(&dir, ACTION_LOG_FILE)?;
            dispatcher = dispatcher.with_action_log(Box::new(log));
        }
        Ok(dispatcher)
    }

    #[must_use]
    pub fn with_scenery(mut self, scenery: impl SceneryOracle + 'static) -> Self {
        self.scenery = Some(Box::new(scenery));
        self
    }

    #[must_use]
    pub fn with_action_log(mut self, log: Box<dyn ActionRepository>) -> Self {
        self.log = Some(log);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// # Errors
    ///
    /// Fails if the world cannot be encoded.
    pub fn checksum(&self) -> Result<StateChecksum> {
        Ok(self.state.checksum()?)
    }

    /// Validates `action` without touching the world.
    ///
    /// On top of the action's own checks this rejects actions that may not
    /// run while paused or outside the editor, and actions the park cannot
    /// afford.
    pub fn query(&self, action: &Action) -> ActionResult {
        let env = GameEnv::new(&self.config, self.scenery.as_deref());
        let flags = action.flags();
        let action_flags = action.action_flags();

        if self.paused
            && !action_flags.contains(ActionFlags::ALLOW_WHILE_PAUSED)
            && !flags.contains(CommandFlags::ALLOW_DURING_PAUSED)
        {
            return ActionResult::error(
                Status::GamePaused,
                StringId::ConstructionNotPossibleWhileGameIsPaused,
                StringId::None,
            );
        }
        if action_flags.contains(ActionFlags::EDITOR_ONLY) && !self.config.editor_mode {
            return ActionResult::error(
                Status::NotInEditorMode,
                StringId::CantDoThis,
                StringId::EditorOnly,
            );
        }

        let result = action.query(&self.state, &env);
        if result.is_ok() && charges(flags) && !self.state.finance.can_afford(result.cost) {
            return result.fail(
                Status::InsufficientFunds,
                StringId::CantDoThis,
                StringId::NotEnoughCashRequires,
            );
        }
        result
    }

    /// Runs `action` through query and, if it passes, execution.
    ///
    /// A client forwards its own actions to the server instead of executing
    /// them; they run once they come back replicated. A server broadcasts
    /// every action it executes.
    ///
    /// # Errors
    ///
    /// Gameplay rejections are returned as `Ok` results. Errors are limited
    /// to encoding the action for the wire and appending to the action log.
    pub fn execute(&mut self, mut action: Action) -> Result<ActionResult> {
        let command = action.action_type();
        let player = action.player();
        let mode = self.state.network.mode;
        let replicated = action.flags().contains(CommandFlags::NETWORKED);

        if mode == NetworkMode::Server
            && !self
                .state
                .network
                .can_perform(player, command.required_permission())
        {
            warn!(%command, %player, "player lacks permission");
            return Ok(ActionResult::error(
                Status::Disallowed,
                StringId::CantDoThis,
                StringId::PermissionDenied,
            ));
        }

        let queried = if mode == NetworkMode::Client && replicated {
            // Already accepted by the server; local pause and cash do not apply.
            let env = GameEnv::new(&self.config, self.scenery.as_deref());
            action.query(&self.state, &env)
        } else {
            self.query(&action)
        };
        if !queried.is_ok() {
            debug!(%command, status = ?queried.status, "query rejected action");
            return Ok(queried);
        }

        if mode == NetworkMode::Client && !replicated {
            action.envelope_mut().network_id = self.allocate_network_id();
            self.outbound.push(action.encode()?);
            debug!(%command, "forwarded action to server");
            return Ok(queried);
        }

        let env = GameEnv::new(&self.config, self.scenery.as_deref());
        let result = action.execute(&mut self.state, &env);
        if !result.is_ok() {
            debug!(%command, status = ?result.status, "execute rejected action");
            return Ok(result);
        }

        if charges(action.flags())
            && result.cost != Money::ZERO
            && let Some(kind) = result.expenditure
        {
            self.state.finance.pay(result.cost, kind);
        }

        self.record(&action)?;

        if mode == NetworkMode::Server {
            let flags = action.flags() | CommandFlags::NETWORKED;
            self.outbound.push(action.with_flags(flags).encode()?);
        }

        debug!(%command, cost = result.cost.0, tick = self.tick, "executed action");
        Ok(result)
    }

    /// Accepts an action from a peer for execution on `tick`.
    ///
    /// `sender` is the player bound to the connection the bytes arrived on.
    /// A server stamps it over the envelope's player so permission checks
    /// see who actually sent the action. A client keeps the envelope's
    /// player, which the server has already stamped.
    ///
    /// # Errors
    ///
    /// Fails if the payload does not decode or `tick` has already passed.
    pub fn receive(&mut self, tick: u32, sender: PlayerId, bytes: &[u8]) -> Result<()> {
        if tick < self.tick {
            return Err(RuntimeError::StaleTick {
                tick,
                current: self.tick,
            });
        }
        let mut action = Action::decode(bytes)?;
        if self.state.network.mode == NetworkMode::Server {
            if action.player() != sender {
                warn!(claimed = %action.player(), %sender, "replacing claimed player");
            }
            action = action.with_player(sender);
        }
        let flags = action.flags() | CommandFlags::NETWORKED;
        debug!(command = %action.action_type(), tick, player = %action.player(), "received action");
        self.queue.push(tick, action.with_flags(flags));
        Ok(())
    }

    /// Schedules a local action for `tick`.
    pub fn enqueue(&mut self, tick: u32, action: Action) {
        self.queue.push(tick, action);
    }

    /// Advances to `tick` and executes every queued action due by then.
    ///
    /// # Errors
    ///
    /// Stops at the first infrastructure error; remaining actions of the
    /// batch are dropped.
    pub fn process_tick(&mut self, tick: u32) -> Result<Vec<ActionResult>> {
        self.tick = self.tick.max(tick);
        self.queue
            .pop_ready(tick)
            .into_iter()
            .map(|(_, action)| self.execute(action))
            .collect()
    }

    /// Re-executes logged actions in order, each on its recorded tick.
    ///
    /// # Errors
    ///
    /// Fails on an entry whose payload no longer decodes.
    pub fn replay(&mut self, entries: &[ActionLogEntry]) -> Result<Vec<ActionResult>> {
        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            self.tick = self.tick.max(entry.tick);
            results.push(self.execute(entry.decode()?)?);
        }
        Ok(results)
    }

    /// Drains encoded actions waiting to be sent to peers.
    pub fn take_outbound(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.outbound)
    }

    /// # Errors
    ///
    /// Propagates the repository's flush error.
    pub fn flush_log(&mut self) -> Result<()> {
        if let Some(log) = self.log.as_mut() {
            log.flush()?;
        }
        Ok(())
    }

    fn record(&mut self, action: &Action) -> Result<()> {
        let Some(log) = self.log.as_mut() else {
            return Ok(());
        };
        let entry = ActionLogEntry::new(self.sequence, self.tick, action)?;
        log.append(&entry)?;
        self.sequence += 1;
        Ok(())
    }

    fn allocate_network_id(&mut self) -> u32 {
        let id = self.next_network_id;
        self.next_network_id = self.next_network_id.wrapping_add(1);
        id
    }
}

/// Ghost previews and explicit no-spend actions are free.
fn charges(flags: CommandFlags) -> bool {
    !flags.intersects(CommandFlags::NO_SPEND | CommandFlags::GHOST)
}
