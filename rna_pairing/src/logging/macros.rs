//! Logging macros
//!
//! Context is written as `"key" => value` pairs. Values are only rendered
//! (through `Display`) when the event will be kept, and every macro is a
//! no-op until global logging is initialized.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:expr, $code:expr, $interval:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::enabled($level) {
            let mut event = $crate::logging::LogEvent::new($level, $message);
            if let Some(code) = $code {
                event = event.with_code(code);
            }
            if let Some(interval) = $interval {
                event = event.with_interval(interval);
            }
            $(
                event = event.with_context($key, ::std::string::ToString::to_string(&$value));
            )*
            $crate::logging::emit(event);
        }
    };
}

/// `log_error!(code, message [, interval = iv] [, "key" => value]*)`
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, interval = $interval:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Error,
            Some($code),
            Some($interval),
            $message
            $(, $key => $value)*
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Error,
            Some($code),
            None,
            $message
            $(, $key => $value)*
        )
    };
}

/// `log_warning!([code = c,] message [, "key" => value]*)`
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Warning,
            Some($code),
            None,
            $message
            $(, $key => $value)*
        )
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Warning,
            None,
            None,
            $message
            $(, $key => $value)*
        )
    };
}

/// Info event tagged with a milestone code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Info,
            Some($code),
            None,
            $message
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Info,
            None,
            None,
            $message
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(
            $crate::logging::LogLevel::Debug,
            None,
            None,
            $message
            $(, $key => $value)*
        )
    };
}

/// Milestone with the elapsed time as `duration_ms`
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_success!(
            $code,
            $message,
            "duration_ms" => format!("{:.3}", $duration.as_secs_f64() * 1000.0)
            $(, $key => $value)*
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::interval::Interval;
    use crate::logging::codes;
    use std::time::Duration;

    #[test]
    fn test_every_form_expands() {
        let length: usize = 42;

        crate::log_error!(codes::sequence::INVALID_BASE, "Invalid base",
            interval = Interval::new(3, 4),
            "character" => 'T',
            "position" => 3,
        );
        crate::log_error!(codes::input::EMPTY_INPUT, "Empty");
        crate::log_success!(codes::sequence::SEQUENCE_PARSED, "Parsed", "length" => length);
        crate::log_info!("Starting", "length" => length, "even" => length % 2 == 0);
        crate::log_warning!(code = codes::solver::LARGE_SEQUENCE, "Large", "length" => length);
        crate::log_warning!("Plain warning");
        crate::log_debug!("Debug detail", "facts" => 7);
        crate::log_performance!(codes::solver::PERFECT_TABLE_COMPLETE, "Done",
            duration = Duration::from_millis(3),
            "facts" => 12
        );
    }
}
