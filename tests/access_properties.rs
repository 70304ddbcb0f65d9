//! Ban/unban interleavings against the in-memory store and the access filter

use std::sync::Arc;

use proptest::prelude::*;
use BannerBot::database::{BannerStore, MemoryStore};
use BannerBot::middleware::{AccessDecision, AccessFilter};
use BannerBot::models::UserProfile;

const ADMIN: i64 = 1;

#[derive(Debug, Clone, Copy)]
enum Op {
    Ban(i64),
    Unban(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(2i64..6).prop_map(Op::Ban), (2i64..6).prop_map(Op::Unban)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_last_operation_wins(ops in prop::collection::vec(op(), 0..40)) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let store = Arc::new(MemoryStore::new());
            let filter = AccessFilter::new(store.clone(), &[ADMIN]);
            let mut expected = std::collections::HashMap::new();

            for op in &ops {
                match *op {
                    Op::Ban(user) => {
                        store.ban(user, ADMIN, None).await.unwrap();
                        expected.insert(user, true);
                    }
                    Op::Unban(user) => {
                        store.unban(user).await.unwrap();
                        expected.insert(user, false);
                    }
                }
            }

            for user in 2i64..6 {
                let banned = expected.get(&user).copied().unwrap_or(false);
                prop_assert_eq!(store.is_banned(user).await.unwrap(), banned);

                let decision = filter.check(user).await.unwrap();
                let wanted = if banned { AccessDecision::Deny } else { AccessDecision::Allow };
                prop_assert_eq!(decision, wanted);
            }

            let ban_count = expected.values().filter(|b| **b).count() as u64;
            prop_assert_eq!(store.ban_count().await.unwrap(), ban_count);
            Ok::<(), TestCaseError>(())
        })?;
    }
}

#[tokio::test]
async fn test_get_or_create_twice_keeps_one_record() {
    let store = MemoryStore::new();
    let profile = UserProfile::new(42);

    store.get_or_create_user(&profile).await.unwrap();
    store.increment_banner_count(42).await.unwrap();
    let again = store.get_or_create_user(&profile).await.unwrap();

    assert_eq!(store.user_count().await.unwrap(), 1);
    assert_eq!(again.banners_generated, 1);
}

#[tokio::test]
async fn test_banned_user_is_not_registered_by_admit() {
    let store = Arc::new(MemoryStore::new());
    let filter = AccessFilter::new(store.clone(), &[ADMIN]);

    store.ban(7, ADMIN, None).await.unwrap();
    assert_eq!(filter.admit(&UserProfile::new(7)).await.unwrap(), AccessDecision::Deny);
    assert!(store.get_user(7).await.unwrap().is_none());

    assert_eq!(filter.admit(&UserProfile::new(8)).await.unwrap(), AccessDecision::Allow);
    assert!(store.get_user(8).await.unwrap().is_some());
}
