// Unit tests for usrlist-manager
// These exercise the public API of each module on its own.

#[cfg(test)]
mod store_tests {
    use usrlist_manager::store::{MemoryStore, RecordStore, UserRecord, seed_users};

    #[tokio::test]
    async fn delete_u1_then_list() {
        let store = MemoryStore::seeded();
        let before_count = store.list().await.len();
        store.delete_by_id("u1").await.expect("delete");
        let after = store.list().await;
        assert_eq!(after.len(), before_count - 1);
        assert!(!after.iter().any(|u| u.id == "u1"));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_and_store_unchanged() {
        let store = MemoryStore::seeded();
        let before = store.list().await;
        let err = store.delete_by_id("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.list().await, before);
    }

    #[test]
    fn seed_contains_four_ivans() {
        let ivans = seed_users()
            .into_iter()
            .filter(|u| u.display_name.starts_with("Ivan"))
            .count();
        assert_eq!(ivans, 4);
    }

    #[test]
    fn user_record_new_sets_fields() {
        let u = UserRecord::new("x1", "Test User", false);
        assert_eq!(u.id, "x1");
        assert_eq!(u.display_name, "Test User");
        assert!(!u.is_active);
    }
}

#[cfg(test)]
mod search_tests {
    use usrlist_manager::search::{filter_records, paginate};
    use usrlist_manager::store::{UserRecord, seed_users};

    #[test]
    fn ivan_matches_regardless_of_case() {
        let users = vec![
            UserRecord::new("u1", "Ivan Z.", true),
            UserRecord::new("u2", "Mikhail X.", true),
            UserRecord::new("u3", "Ivan C.", true),
        ];
        for q in ["ivan", "Ivan", "IVAN"] {
            let hits = filter_records(&users, Some(q));
            assert_eq!(hits.len(), 2);
            assert!(hits.iter().all(|u| u.display_name.starts_with("Ivan")));
        }
    }

    #[test]
    fn pagination_slices_filtered_set_not_full_set() {
        let filtered = filter_records(&seed_users(), Some("Ivan"));
        assert_eq!(filtered.len(), 4);
        let page = paginate(&filtered, 1, 5);
        assert_eq!(page.len(), 4);
        assert!(paginate(&filtered, 2, 5).is_empty());
    }

    #[test]
    fn items_length_matches_invariant() {
        let users = seed_users();
        for per_page in [5u32, 10, 20] {
            for page in 1..=5u32 {
                let got = paginate(&users, page, per_page).len();
                let offset = (page as usize - 1) * per_page as usize;
                let expected = users.len().saturating_sub(offset).min(per_page as usize);
                assert_eq!(got, expected, "page={page} per_page={per_page}");
            }
        }
    }
}

#[cfg(test)]
mod pagination_tests {
    use usrlist_manager::pagination::{PaginationState, total_pages};

    #[test]
    fn total_pages_and_page_list_agree() {
        let state = PaginationState::new();
        for per_page in [1u32, 3, 5, 10, 20] {
            for total in [0usize, 1, 4, 5, 6, 17, 100] {
                let expected = total.div_ceil(per_page as usize) as u32;
                assert_eq!(total_pages(total, per_page), expected);
                let pages = state.compute_valid_page_numbers(total, per_page);
                assert_eq!(pages, (1..=expected).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn zero_page_size_gives_no_pages() {
        let state = PaginationState::new();
        assert!(state.compute_valid_page_numbers(10, 0).is_empty());
    }

    #[test]
    fn shrinking_result_clamps_current_page() {
        let state = PaginationState::new();
        state.set_current_page(5);
        let mut sub = state.get_current_page();
        state.compute_valid_page_numbers(12, 5);
        assert_eq!(state.current_page(), 1);
        assert_eq!(sub.try_next(), Some(5));
        assert_eq!(sub.try_next(), Some(1));
    }

    #[test]
    fn get_current_page_is_idempotent() {
        let state = PaginationState::new();
        state.set_current_page(2);
        let mut a = state.get_current_page();
        let mut b = state.get_current_page();
        assert_eq!(a.try_next(), b.try_next());
        assert_eq!(state.current_page(), state.current_page());
    }
}

#[cfg(test)]
mod query_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use usrlist_manager::query::{ListQuery, QueryCoordinator};
    use usrlist_manager::store::MemoryStore;

    #[tokio::test(start_paused = true)]
    async fn seed_search_ivan_page_one() {
        let q = QueryCoordinator::new(Arc::new(MemoryStore::seeded()), Duration::from_secs(1));
        let res = q.list(&ListQuery::new(1, 5).with_search("Ivan")).await;
        assert_eq!(res.total_count, 4);
        assert_eq!(res.items.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_is_never_left_up() {
        let q = QueryCoordinator::new(Arc::new(MemoryStore::seeded()), Duration::from_millis(200));
        for page in 1..=5 {
            q.list(&ListQuery::new(page, 5)).await;
            assert!(!q.is_loading());
        }
        assert!(q.remove("nope").await.is_err());
        assert!(!q.is_loading());
    }
}

#[cfg(test)]
mod config_file_tests {
    use usrlist_manager::app::{Keymap, Theme};

    #[test]
    fn theme_roundtrip_and_init() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("theme.conf");

        Theme::mocha().write_file(&path).expect("write theme");
        assert_eq!(Theme::from_file(&path), Some(Theme::mocha()));

        // Named colors are stored as hex approximations
        Theme::dark().write_file(&path).expect("write theme");
        let t2 = Theme::from_file(&path).expect("read theme");
        assert_eq!(format!("{:?}", t2.header_bg), "Rgb(0, 0, 0)");

        let fresh = dir.path().join("fresh.conf");
        let created = Theme::load_or_init(&fresh);
        assert!(fresh.exists());
        assert_eq!(created, Theme::mocha());
    }

    #[test]
    fn keymap_written_defaults_load_back() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        use usrlist_manager::app::KeyAction;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("keybinds.conf");
        let km = Keymap::load_or_init(&path);
        assert!(path.exists());

        let loaded = Keymap::from_file(&path).expect("read keymap");
        assert_eq!(loaded.all_bindings().len(), km.all_bindings().len());
        let v = KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE);
        assert_eq!(loaded.resolve(&v), Some(KeyAction::ToggleView));
    }
}
