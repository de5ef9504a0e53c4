use super::*;

#[test]
fn level_matches_build_profile() {
    if cfg!(debug_assertions) {
        assert_eq!(level(), log::Level::Debug);
    } else {
        assert_eq!(level(), log::Level::Info);
    }
}

#[test]
fn init_is_callable_more_than_once() {
    init();
    init();
}
