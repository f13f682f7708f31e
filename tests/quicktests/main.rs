use quickcheck::{Arbitrary, Gen};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod ordered_set;

/// An enum for the various kinds of "things" to do to
/// an ordered set in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Remove the K from the data structure
    Remove(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g))
        } else {
            Op::Remove(K::arbitrary(g))
        }
    }
}

/// Sends the tree's trace events to the test output. Filter them with `RUST_LOG`, e.g.
/// `RUST_LOG=order_stat_tree=trace cargo test -- --nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_stat_tree=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
