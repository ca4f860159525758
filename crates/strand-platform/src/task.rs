//! Task spawning and cooperative yielding.

use std::future::Future;

use crate::MaybeSend;

/// Hands control back to the scheduler once.
///
/// Other ready tasks (command dispatch, event delivery) get to run before the
/// caller resumes. Never sleeps.
#[cfg(not(target_arch = "wasm32"))]
pub async fn yield_now() {
    tokio::task::yield_now().await;
}

#[cfg(target_arch = "wasm32")]
pub async fn yield_now() {
    YieldNow { yielded: false }.await;
}

#[cfg(target_arch = "wasm32")]
struct YieldNow {
    yielded: bool,
}

#[cfg(target_arch = "wasm32")]
impl Future for YieldNow {
    type Output = ();

    fn poll(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<()> {
        if self.yielded {
            return std::task::Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        std::task::Poll::Pending
    }
}

/// Runs `fut` as a detached background task.
///
/// Must be called from within a runtime (tokio on native, the browser event
/// loop on wasm32).
pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + MaybeSend + 'static,
{
    #[cfg(not(target_arch = "wasm32"))]
    {
        drop(tokio::spawn(fut));
    }

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(fut);
    }
}
