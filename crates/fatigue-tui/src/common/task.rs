use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// `POST /predict`
    Submit,
    /// Result polling for the session shown in Loading.
    Poll,
    /// `POST /feedback`
    Feedback,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Records the token of a started task. Returns false when `id` was
    /// superseded after being reserved; the caller should cancel it.
    pub fn on_started(&mut self, started: &TaskStarted) -> bool {
        let ok = self.active == Some(started.id);
        if ok {
            self.cancel = started.cancel.clone();
        }
        ok
    }

    /// Marks `id` as live before the runtime spawns it.
    pub fn reserve(&mut self, id: TaskId) {
        self.active = Some(id);
        self.cancel = None;
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub submit: TaskState,
    pub poll: TaskState,
    pub feedback: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Submit => &mut self.submit,
            TaskKind::Poll => &mut self.poll,
            TaskKind::Feedback => &mut self.feedback,
        }
    }

    /// Submit and poll together form one prediction round trip.
    pub fn is_predicting(&self) -> bool {
        self.submit.is_running() || self.poll.is_running()
    }

    pub fn is_any_running(&self) -> bool {
        self.is_predicting() || self.feedback.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut seq = TaskSeq::default();
        let mut state = TaskState::default();

        let first = seq.next_id();
        state.reserve(first);
        state.clear();

        let second = seq.next_id();
        state.reserve(second);
        assert!(!state.finish_if_active(first));
        assert!(state.is_running());
        assert!(state.finish_if_active(second));
        assert!(!state.is_running());
    }

    #[test]
    fn test_started_for_superseded_id_is_rejected() {
        let mut state = TaskState::default();
        state.reserve(TaskId(2));
        assert!(!state.on_started(&TaskStarted {
            id: TaskId(1),
            cancel: Some(CancellationToken::new()),
        }));
        assert_eq!(state.active, Some(TaskId(2)));
        assert!(state.cancel.is_none());

        let token = CancellationToken::new();
        assert!(state.on_started(&TaskStarted {
            id: TaskId(2),
            cancel: Some(token.clone()),
        }));
        token.cancel();
        assert!(state.cancel.as_ref().is_some_and(CancellationToken::is_cancelled));

        state.clear();
        assert!(!state.on_started(&TaskStarted {
            id: TaskId(2),
            cancel: None,
        }));
    }
}
