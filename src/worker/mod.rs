//! Task Worker — spec.md §4.7. An AMQP consumer loop pulling admission
//! payloads off the dispatch queue and driving the Dispatch Engine, with a
//! constant-backoff retry policy for transient faults.

pub mod consumer;

pub use consumer::run;
