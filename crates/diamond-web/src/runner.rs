use diamond_quest::{
    AudioSink, EngineContext, FixedTimestep, Game, GameConfig, GameEvent, InputEvent, InputQueue,
    InputState, KeyMap, NullAudio, SCREEN_HEIGHT, WORLD_WIDTH,
};

/// Generic game runner that wires up the simulation loop.
///
/// The exported `game_*` functions keep one of these in a `thread_local!`,
/// because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game, A: AudioSink = NullAudio> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    input_state: InputState,
    keymap: KeyMap,
    timestep: FixedTimestep,
    config: GameConfig,
    audio: A,
    initialized: bool,
    stopped: bool,
    /// Flat buffer of sound cue ids for the page's audio manager.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        Self::with_audio(game, NullAudio)
    }
}

impl<G: Game, A: AudioSink> GameRunner<G, A> {
    pub fn with_audio(game: G, audio: A) -> Self {
        let config = game.config();
        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            input_state: InputState::new(),
            keymap: KeyMap::default(),
            timestep: FixedTimestep::new(config.fixed_dt),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            config,
            audio,
            initialized: false,
            stopped: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.ctx = EngineContext::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fold input, advance whole ticks, forward sounds.
    ///
    /// Presses are seen by the first tick of the frame only. A frame that
    /// runs no tick keeps them for the next one.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized || self.stopped {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.input_state.apply(self.input.drain(), &self.keymap);

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input_state);
            self.ctx.effects.tick();
            self.input_state.clear_edges();
            if self.game.wants_quit() {
                log::info!("runner stopped on quit");
                self.stopped = true;
                break;
            }
        }

        self.sound_buffer.clear();
        for &cue in &self.ctx.sounds {
            self.audio.play(cue);
            self.sound_buffer.push(cue.id());
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Mutable access for operations outside the tick loop (save restore).
    /// Returns the context too, since those operations emit events.
    pub fn game_mut(&mut self) -> (&mut G, &mut EngineContext) {
        (&mut self.game, &mut self.ctx)
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn snapshot(&self) -> G::Snapshot {
        self.game.snapshot(&self.ctx)
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    pub fn should_quit(&self) -> bool {
        self.stopped
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn sound_events(&self) -> &[u8] {
        &self.sound_buffer
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    /// Events flattened to `GameEvent::FLOATS` floats each.
    pub fn game_events(&self) -> &[f32] {
        bytemuck::cast_slice::<GameEvent, f32>(&self.ctx.events)
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.game_events().as_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        WORLD_WIDTH
    }

    pub fn world_height(&self) -> f32 {
        SCREEN_HEIGHT
    }

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
