// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive terminal.
//
// Module responsibilities:
// - `parse`: tokenizer and flag extraction for a raw input line.
// - `registry`: the ordered table of commands and their descriptions.
// - `dispatch`: the interpreter that runs one line end to end and records
//   it in the session log.
// - `session`: the append-only scrollback of a session.
// - `service`: the joke backend contract and its error type.
// - `api`: the REST client implementing that contract.
// - `config` / `logging`: startup settings and tracing setup.
// - `ui`: terminal rendering and the read loop.
//
// Everything except `ui` is usable without a terminal, which is how the
// integration tests drive the interpreter.
pub mod api;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod parse;
pub mod registry;
pub mod service;
pub mod session;
pub mod ui;
