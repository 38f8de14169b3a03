//! Stub collaborators shared by the integration tests.

#![allow(dead_code)]

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex},
};

use chrono::{NaiveDate, NaiveDateTime};
use geni_abac::{
    Binder, BinderError, Bindings, CallContext, CallContextBuilder, CallOutcome,
    CredentialVerifier, FixedClock, Method, VerificationError,
};
use geni_urn::{Urn, UrnError};

pub const AGGREGATE_URN: &str = "urn:publicid:IDN+utah.example.net+authority+cm";
pub const CALLER_URN: &str = "urn:publicid:IDN+example.org:bob+user+bob";
pub const SLICE_URN: &str = "urn:publicid:IDN+example.org:myproj+slice+myslice";

pub fn aggregate() -> Arc<Urn> {
    Arc::new(AGGREGATE_URN.parse().expect("valid aggregate urn"))
}

pub fn call(method: Method) -> CallContextBuilder {
    CallContext::builder(method, CALLER_URN, aggregate())
}

/// Wednesday 2024-05-15, 13:45:30 local time.
pub fn wednesday_afternoon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 15)
        .and_then(|date| date.and_hms_opt(13, 45, 30))
        .expect("valid date")
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(wednesday_afternoon()))
}

/// The arguments a verifier was called with.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyCall {
    pub caller: String,
    pub credentials: Vec<String>,
    pub slice_urn: Option<String>,
    pub privileges: BTreeSet<String>,
}

/// Verifier that returns a canned answer and records its calls.
pub struct StubVerifier {
    answer: Result<(), VerificationError>,
    pub calls: Mutex<Vec<VerifyCall>>,
}

impl StubVerifier {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting(error: VerificationError) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(error),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<VerifyCall> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait::async_trait]
impl CredentialVerifier for StubVerifier {
    async fn verify(
        &self,
        caller: &str,
        credentials: &[String],
        slice_urn: Option<&str>,
        privileges: &BTreeSet<String>,
        _options: &BTreeMap<String, serde_json::Value>,
    ) -> Result<(), VerificationError> {
        self.calls.lock().expect("lock").push(VerifyCall {
            caller: caller.to_owned(),
            credentials: credentials.to_vec(),
            slice_urn: slice_urn.map(str::to_owned),
            privileges: privileges.clone(),
        });
        self.answer.clone()
    }
}

/// Binder that emits fixed bindings, or fails, and counts hook calls.
pub struct ScriptedBinder {
    pub name: &'static str,
    pub bindings: Vec<(&'static str, &'static str)>,
    pub fails: bool,
    pub best_effort: bool,
    pub hook_fails: bool,
    pub hooks: Mutex<Vec<CallOutcome>>,
}

impl ScriptedBinder {
    pub fn emitting(name: &'static str, bindings: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            name,
            bindings,
            fails: false,
            best_effort: false,
            hook_fails: false,
            hooks: Mutex::new(Vec::new()),
        }
    }

    pub fn hooks_seen(&self) -> usize {
        self.hooks.lock().expect("lock").len()
    }
}

#[async_trait::async_trait]
impl Binder for ScriptedBinder {
    fn name(&self) -> &str {
        self.name
    }

    fn is_best_effort(&self) -> bool {
        self.best_effort
    }

    async fn generate_bindings(&self, _context: &CallContext) -> Result<Bindings, BinderError> {
        if self.fails {
            return Err(BinderError::MalformedUrn {
                field: "slice_urn",
                source: UrnError::Malformed {
                    input: self.name.to_owned(),
                    expected: "a slice urn",
                },
            });
        }
        Ok(self.bindings.iter().copied().collect())
    }

    async fn handle_result(
        &self,
        _context: &CallContext,
        outcome: &CallOutcome,
    ) -> Result<(), BinderError> {
        self.hooks.lock().expect("lock").push(outcome.clone());
        if self.hook_fails {
            return Err(BinderError::Hook(format!("{} hook exploded", self.name)));
        }
        Ok(())
    }
}
