pub mod runner;

pub use runner::GameRunner;

/// Generate the `#[wasm_bindgen]` exports shared by every game:
/// - `thread_local!` storage for the GameRunner
/// - a `with_runner()` helper that is a no-op before `game_init()`
/// - init, tick, input handlers and buffer accessors
///
/// The game type needs a `new()` constructor and a `Game` impl. The caller
/// must have `wasm_bindgen::prelude::*` and `diamond_quest::*` in scope.
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use diamond_quest::*;
///
/// diamond_web::export_game!(MyGame, "my-game");
/// ```
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: call game_init() first", $game_name);
                        None
                    }
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        /// Touch controls. `action` is an index into `Action::ALL`.
        #[wasm_bindgen]
        pub fn game_action_down(action: u32) {
            if let Some(action) = Action::from_id(action) {
                with_runner(|r| r.push_input(InputEvent::ActionDown(action)));
            }
        }

        #[wasm_bindgen]
        pub fn game_action_up(action: u32) {
            if let Some(action) = Action::from_id(action) {
                with_runner(|r| r.push_input(InputEvent::ActionUp(action)));
            }
        }

        #[wasm_bindgen]
        pub fn game_should_quit() -> bool {
            with_runner(|r| r.should_quit()).unwrap_or(false)
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn game_snapshot_json() -> String {
            with_runner(|r| r.snapshot_json())
                .and_then(|json| json.map_err(|err| log::warn!("snapshot: {err}")).ok())
                .unwrap_or_default()
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }
    };
}

/// Exports for Diamond Quest.
pub mod bindings {
    use diamond_quest::*;
    use wasm_bindgen::prelude::*;

    crate::export_game!(DiamondQuest, "diamond-quest");

    // ---- Save states and scores ----

    #[wasm_bindgen]
    pub fn game_save_state_json() -> String {
        with_runner(|r| r.game().save_state().to_json())
            .and_then(|json| json.map_err(|err| log::warn!("save state: {err}")).ok())
            .unwrap_or_default()
    }

    /// Restore a save posted by the page. Returns false and leaves the run
    /// untouched if the JSON is malformed or out of range.
    #[wasm_bindgen]
    pub fn game_load_state_json(json: &str) -> bool {
        let save = match SaveState::from_json(json) {
            Ok(save) => save,
            Err(err) => {
                log::warn!("save state is not valid JSON: {err}");
                return false;
            }
        };
        with_runner(|r| {
            let (game, ctx) = r.game_mut();
            game.apply_save(&save, ctx).is_ok()
        })
        .unwrap_or(false)
    }

    /// The current run as a high-score submission, stamped with the page clock.
    #[wasm_bindgen]
    pub fn game_score_submission_json(player_name: &str) -> String {
        let now = js_sys::Date::now() as u64;
        with_runner(|r| serde_json::to_string(&r.game().score_submission(player_name, now)))
            .and_then(|json| json.map_err(|err| log::warn!("score submission: {err}")).ok())
            .unwrap_or_default()
    }
}
