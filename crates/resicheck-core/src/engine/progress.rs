/// Events emitted while a batch of structures is being checked.
///
/// Events for individual inputs may arrive from several worker threads and in any
/// order; only `BatchStart` and `BatchFinish` bracket the others.
#[derive(Debug, Clone)]
pub enum Progress {
    BatchStart { total: u64 },
    InputFinished { index: usize, succeeded: bool },
    BatchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        ProgressReporter::new().report(Progress::BatchFinish);
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            seen.lock().unwrap().push(format!("{event:?}"));
        }));
        reporter.report(Progress::BatchStart { total: 2 });
        reporter.report(Progress::Message("hello".to_string()));
        drop(reporter);
        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["BatchStart { total: 2 }", "Message(\"hello\")"]
        );
    }
}
