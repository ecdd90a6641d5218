use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Context, Result};
use portal_core::{update, AppState, Msg, Portal};
use portal_engine::{EngineHandle, SessionStore};
use portal_logging::portal_debug;

use super::config::PortalConfig;
use super::effects::EffectRunner;
use super::render;

/// Margin on top of the request timeout before a silent engine is an error.
const WAIT_MARGIN: Duration = Duration::from_secs(5);

/// Owns the core state and feeds it messages until nothing is outstanding.
pub struct App {
    state: AppState,
    runner: EffectRunner,
    wait_limit: Duration,
}

impl App {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let engine = EngineHandle::new(config.api_settings())
            .with_context(|| format!("cannot use API url {:?}", config.api_url))?;
        let store = SessionStore::new(&config.session_file);
        Ok(Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine, store),
            wait_limit: config.request_timeout + WAIT_MARGIN,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies `msg` and everything it triggers, then waits for the engine
    /// to answer every request that was issued along the way.
    pub fn send(&mut self, msg: Msg) -> Result<()> {
        self.dispatch(msg);
        while self.runner.outstanding() > 0 {
            let msgs = self.runner.wait(self.wait_limit)?;
            for msg in msgs {
                self.dispatch(msg);
            }
        }
        Ok(())
    }

    /// Opens a portal, following any redirect the session gate issues.
    pub fn open(&mut self, portal: Portal) -> Result<()> {
        self.send(Msg::PortalOpened(portal))
    }

    /// Text for everything that changed since the last call. Drains notices.
    pub fn render(&mut self) -> Result<Option<String>> {
        if !self.state.consume_dirty() {
            return Ok(None);
        }
        let view = self.state.view();
        self.state.take_notices();
        let text = render::render(&view).context("cannot render the view")?;
        Ok(Some(text))
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            if is_stale(&self.state, &msg) {
                portal_debug!("Discarding stale result: {}", describe(&msg));
            }
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            queue.extend(self.runner.run(effects));
        }
    }
}

/// True for list results that the mounted controller will ignore.
fn is_stale(state: &AppState, msg: &Msg) -> bool {
    match msg {
        Msg::FeedFetched { request, .. } => state.feed().is_none_or(|c| !c.is_current(request)),
        Msg::RecruiterJobsFetched { request, .. } => state
            .recruiter_jobs()
            .is_none_or(|c| !c.is_current(request)),
        Msg::ApplicationsFetched { request, .. } => state
            .applications()
            .is_none_or(|c| !c.is_current(request)),
        Msg::MeetingsFetched { request, .. } => {
            state.meetings().is_none_or(|c| !c.is_current(request))
        }
        _ => false,
    }
}

fn describe(msg: &Msg) -> String {
    match msg {
        Msg::FeedFetched { request, .. } => format!(
            "feed {} page {} token {}",
            request.filter.key(),
            request.page,
            request.refresh_token
        ),
        Msg::RecruiterJobsFetched { request, .. } => {
            format!("jobs page {} token {}", request.page, request.refresh_token)
        }
        Msg::ApplicationsFetched { request, .. } => format!(
            "applications of job {} page {} token {}",
            request.filter, request.page, request.refresh_token
        ),
        Msg::MeetingsFetched { request, .. } => format!(
            "meetings of job {} page {} token {}",
            request.filter, request.page, request.refresh_token
        ),
        other => format!("{other:?}"),
    }
}
