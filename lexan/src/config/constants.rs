pub mod compile_time {
    pub mod source {
        /// Maximum source file size accepted for lexing (10MB)
        /// RESOURCE: the whole file is held in memory for one run
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Maximum line count accepted for lexing
        pub const MAX_LINE_COUNT: usize = 1_000_000;

        /// Extensions treated as lexan sources when none are configured
        pub const DEFAULT_EXTENSIONS: &[&str] = &["lx", "txt"];
    }

    pub mod lexical {
        /// Initial token buffer capacity, as a divisor of the source length
        /// PERFORMANCE: average token plus separator is a few bytes
        pub const TOKEN_CAPACITY_DIVISOR: usize = 4;

        /// Maximum length of a lexeme echoed into log context
        pub const MAX_LOGGED_LEXEME_LENGTH: usize = 64;
    }

    pub mod batch {
        /// Maximum worker threads for parallel lexing
        pub const MAX_WORKER_THREADS: usize = 8;

        /// Maximum files accepted in a single batch
        pub const MAX_FILES_PER_BATCH: usize = 1000;

        /// Maximum directory depth walked during discovery
        pub const MAX_DISCOVERY_DEPTH: usize = 32;
    }

    pub mod logging {
        /// Events retained by `MemoryLogger` before the oldest are dropped
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum message length before truncation
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;
    }
}
