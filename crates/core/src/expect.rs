// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Expectation matching for stub calls.
//!
//! [`MockSupport`] is a cheap, cloneable handle: the test keeps one clone to
//! declare and check expectations while the running [`Session`](crate::Session)
//! holds another as its [`CallVerifier`].
//!
//! ```
//! use pinspy_core::expect::MockSupport;
//!
//! let mock = MockSupport::new();
//! mock.expect_one_call("digitalWrite")
//!     .with_parameter("pin", 13)
//!     .with_parameter("value", 1);
//! mock.expect_no_call("delay");
//! mock.ignore_other_calls();
//! ```

use crate::bridge::CallVerifier;
use crate::event::{CallEvent, Value};
use pinspy_config::ExpectationScript;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockFailure {
    #[error("unexpected call: {call}")]
    UnexpectedCall { call: CallEvent },
    #[error("unexpected parameters: {call}; expected one of: {expected}")]
    UnexpectedParameters { call: CallEvent, expected: String },
    #[error("call was expected not to happen: {call}")]
    ForbiddenCall { call: CallEvent },
    #[error("call happened more often than expected: {call}")]
    TooManyCalls { call: CallEvent },
    #[error("out of order call: {call}; still waiting for {expected}")]
    OutOfOrder { call: CallEvent, expected: String },
    #[error("expected calls did not happen: {}", .0.join("; "))]
    UnmetExpectations(Vec<String>),
    #[error("return value {value} of {call} does not fit the return type")]
    ReturnType { call: String, value: Value },
}

#[derive(Debug, Clone)]
struct Expectation {
    name: String,
    params: Vec<(String, Value)>,
    returns: Option<Value>,
    expected: usize,
    actual: usize,
}

impl Expectation {
    fn new(name: String, expected: usize) -> Self {
        Self {
            name,
            params: Vec::new(),
            returns: None,
            expected,
            actual: 0,
        }
    }

    /// Parameters the expectation doesn't name are not checked.
    fn matches(&self, call: &CallEvent) -> bool {
        self.params
            .iter()
            .all(|(name, value)| call.param(name) == Some(value))
    }

    fn remaining(&self) -> usize {
        self.expected.saturating_sub(self.actual)
    }

    fn is_forbidding(&self) -> bool {
        self.expected == 0
    }

    fn describe(&self) -> String {
        let mut call = CallEvent::new(self.name.clone());
        call.params = self.params.clone();
        format!("{} x{} (called {})", call, self.expected, self.actual)
    }
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<Expectation>,
    ignore_other_calls: bool,
    strict_order: bool,
    calls: Vec<CallEvent>,
}

impl MockState {
    fn first_pending(&self) -> Option<usize> {
        self.expectations
            .iter()
            .position(|e| !e.is_forbidding() && e.remaining() > 0)
    }

    fn accept(&mut self, call: &CallEvent) -> Result<Option<Value>, MockFailure> {
        let same_name: Vec<usize> = self
            .expectations
            .iter()
            .enumerate()
            .filter(|(_, e)| e.name == call.name)
            .map(|(idx, _)| idx)
            .collect();

        if same_name.is_empty() {
            if self.ignore_other_calls {
                self.calls.push(call.clone());
                return Ok(None);
            }
            return Err(MockFailure::UnexpectedCall { call: call.clone() });
        }

        let candidate = same_name.iter().copied().find(|&idx| {
            let e = &self.expectations[idx];
            e.remaining() > 0 && e.matches(call)
        });

        let Some(idx) = candidate else {
            let matching: Vec<&Expectation> = same_name
                .iter()
                .map(|&idx| &self.expectations[idx])
                .filter(|e| e.matches(call))
                .collect();
            if matching.iter().any(|e| e.is_forbidding()) {
                return Err(MockFailure::ForbiddenCall { call: call.clone() });
            }
            if !matching.is_empty() {
                return Err(MockFailure::TooManyCalls { call: call.clone() });
            }
            let expected = same_name
                .iter()
                .map(|&idx| self.expectations[idx].describe())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(MockFailure::UnexpectedParameters {
                call: call.clone(),
                expected,
            });
        };

        if self.strict_order {
            if let Some(first) = self.first_pending() {
                if first != idx {
                    return Err(MockFailure::OutOfOrder {
                        call: call.clone(),
                        expected: self.expectations[first].describe(),
                    });
                }
            }
        }

        let expectation = &mut self.expectations[idx];
        expectation.actual += 1;
        let returns = expectation.returns.clone();
        self.calls.push(call.clone());
        Ok(returns)
    }
}

/// Shared expectation book-keeping for one test.
#[derive(Debug, Clone, Default)]
pub struct MockSupport {
    state: Rc<RefCell<MockState>>,
}

/// Refines the expectation most recently declared on a [`MockSupport`].
pub struct ExpectedCall<'a> {
    mock: &'a MockSupport,
    idx: usize,
}

impl ExpectedCall<'_> {
    pub fn with_parameter(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.mock.state.borrow_mut().expectations[self.idx]
            .params
            .push((name.into(), value.into()));
        self
    }

    pub fn and_return_value(self, value: impl Into<Value>) -> Self {
        self.mock.state.borrow_mut().expectations[self.idx].returns = Some(value.into());
        self
    }
}

impl MockSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_one_call(&self, name: impl Into<String>) -> ExpectedCall<'_> {
        self.expect_n_calls(1, name)
    }

    pub fn expect_n_calls(&self, count: usize, name: impl Into<String>) -> ExpectedCall<'_> {
        let mut state = self.state.borrow_mut();
        state.expectations.push(Expectation::new(name.into(), count));
        ExpectedCall {
            mock: self,
            idx: state.expectations.len() - 1,
        }
    }

    /// Any call to `name` fails, even while other calls are ignored.
    /// Parameters added to the returned builder narrow what is forbidden.
    pub fn expect_no_call(&self, name: impl Into<String>) -> ExpectedCall<'_> {
        self.expect_n_calls(0, name)
    }

    pub fn ignore_other_calls(&self) {
        self.state.borrow_mut().ignore_other_calls = true;
    }

    pub fn strict_order(&self) {
        self.state.borrow_mut().strict_order = true;
    }

    pub fn load_script(&self, script: &ExpectationScript) {
        for expected in &script.expectations {
            let mut builder = self.expect_n_calls(expected.times, expected.call.clone());
            for (name, value) in &expected.params {
                builder = builder.with_parameter(name.clone(), value);
            }
            if let Some(value) = &expected.returns {
                builder.and_return_value(value);
            }
        }
        if script.ignore_other_calls {
            self.ignore_other_calls();
        }
        if script.strict_order {
            self.strict_order();
        }
    }

    /// Calls accepted since the last [`clear`](Self::clear), including ignored ones.
    pub fn calls(&self) -> Vec<CallEvent> {
        self.state.borrow().calls.clone()
    }

    pub fn calls_to(&self, name: &str) -> Vec<CallEvent> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.name == name)
            .cloned()
            .collect()
    }

    pub fn verify(&self) -> Result<(), MockFailure> {
        let unmet: Vec<String> = self
            .state
            .borrow()
            .expectations
            .iter()
            .filter(|e| e.actual < e.expected)
            .map(Expectation::describe)
            .collect();
        if unmet.is_empty() {
            Ok(())
        } else {
            Err(MockFailure::UnmetExpectations(unmet))
        }
    }

    #[track_caller]
    pub fn check_expectations(&self) {
        if let Err(failure) = self.verify() {
            panic!("{}", failure);
        }
    }

    /// Closes the current checkpoint window.
    pub fn clear(&self) {
        *self.state.borrow_mut() = MockState::default();
    }
}

impl CallVerifier for MockSupport {
    fn actual_call(&mut self, call: &CallEvent) -> Result<Option<Value>, MockFailure> {
        self.state.borrow_mut().accept(call)
    }
}
