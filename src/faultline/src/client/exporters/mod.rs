pub mod webhook_forward;
