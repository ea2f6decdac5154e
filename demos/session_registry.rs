use generic_sync_map::{MapError, SyncMap, SyncMapConfig};
use std::sync::Arc;
use std::thread;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone)]
struct Session {
    user: String,
    requests: u32,
}

struct SessionRegistry {
    sessions: SyncMap<u64, Session>,
}

impl SessionRegistry {
    fn new() -> Result<Self, MapError> {
        let sessions = SyncMapConfig::new().capacity(64).shard_amount(8).build()?;
        Ok(Self { sessions })
    }

    fn open(&self, id: u64, user: &str) -> bool {
        let (_, existed) = self.sessions.get_or_insert(
            id,
            Session {
                user: user.to_string(),
                requests: 0,
            },
        );
        !existed
    }

    fn touch(&self, id: u64) -> Option<u32> {
        self.sessions.with_mut(&id, |session| {
            session.requests += 1;
            session.requests
        })
    }

    fn close(&self, id: u64) -> Option<Session> {
        self.sessions.remove(&id)
    }
}

fn main() -> Result<(), MapError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    fmt().with_env_filter(filter).with_target(false).compact().init();

    let registry = Arc::new(SessionRegistry::new()?);

    let workers: Vec<_> = (0..4u64)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for n in 0..5 {
                    let id = worker * 10 + n;
                    registry.open(id, &format!("user-{}", id));
                    registry.touch(id);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().expect("worker thread panicked");
    }

    info!(open = registry.sessions.len(), "sessions opened");

    if let Some(session) = registry.close(12) {
        info!(user = %session.user, requests = session.requests, "closed session");
    }

    // A second open on a live id is refused
    let reopened = registry.open(3, "intruder");
    info!(reopened, "reopen attempt on session 3");

    let mut busiest = None;
    registry.sessions.range(|id, session| {
        if session.requests > 0 {
            busiest = Some((*id, session.user.clone()));
            return false;
        }
        true
    });
    info!(?busiest, "first active session found");

    Ok(())
}
