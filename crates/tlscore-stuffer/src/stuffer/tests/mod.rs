//! Unit tests for stuffer cursor bookkeeping and bounds checks.

use super::*;
