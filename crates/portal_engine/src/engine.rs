use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use portal_logging::{portal_error, portal_warn};

use crate::client::{ApiSettings, PortalApi, ReqwestPortalApi};
use crate::wire::{ApiCall, Collection, Credentials, Signup};
use crate::{ApiError, EngineEvent, RequestId};

enum EngineCommand {
    LoadPage {
        request_id: RequestId,
        token: Option<String>,
        collection: Collection,
        page: u32,
    },
    Call {
        request_id: RequestId,
        token: Option<String>,
        call: ApiCall,
    },
    Login {
        request_id: RequestId,
        credentials: Credentials,
    },
    Register {
        request_id: RequestId,
        signup: Signup,
    },
}

/// Runs requests on a background tokio runtime. Commands go in over one
/// channel, one [`EngineEvent`] per command comes back over the other.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let api = ReqwestPortalApi::new(settings)?;
        Ok(Self::with_api(Arc::new(api)))
    }

    pub fn with_api(api: Arc<dyn PortalApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    portal_error!("Could not start the request runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), command).await;
                    if event_tx.send(event).is_err() {
                        portal_warn!("Engine event dropped; receiver is gone");
                    }
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn load_page(
        &self,
        request_id: RequestId,
        token: Option<String>,
        collection: Collection,
        page: u32,
    ) {
        self.send(EngineCommand::LoadPage {
            request_id,
            token,
            collection,
            page,
        });
    }

    pub fn call(&self, request_id: RequestId, token: Option<String>, call: ApiCall) {
        self.send(EngineCommand::Call {
            request_id,
            token,
            call,
        });
    }

    pub fn login(&self, request_id: RequestId, credentials: Credentials) {
        self.send(EngineCommand::Login {
            request_id,
            credentials,
        });
    }

    pub fn register(&self, request_id: RequestId, signup: Signup) {
        self.send(EngineCommand::Register { request_id, signup });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next event. Errors once the engine
    /// thread has stopped.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, ApiError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ApiError::new(
                crate::FailureKind::Network,
                "request engine stopped",
            )),
        }
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            portal_error!("Engine thread is not running; command dropped");
        }
    }
}

async fn handle_command(api: &dyn PortalApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::LoadPage {
            request_id,
            token,
            collection,
            page,
        } => EngineEvent::PageLoaded {
            request_id,
            result: api.load_page(token.as_deref(), collection, page).await,
        },
        EngineCommand::Call {
            request_id,
            token,
            call,
        } => EngineEvent::CallCompleted {
            request_id,
            result: api.call(token.as_deref(), &call).await,
        },
        EngineCommand::Login {
            request_id,
            credentials,
        } => EngineEvent::SessionGranted {
            request_id,
            result: api.login(&credentials).await,
        },
        EngineCommand::Register { request_id, signup } => EngineEvent::SessionGranted {
            request_id,
            result: api.register(&signup).await,
        },
    }
}
