/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat`   — Interactive chat mode
- `routes` — Print the intent dispatch table

These handlers are intentionally small and use the library components:
the session store, the orchestrator, and the router.
*/

// Interactive chat handler
pub mod chat;

// Route inspection
pub mod routes;

// Special commands parser for session management
pub mod special_commands;
