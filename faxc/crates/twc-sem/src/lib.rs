//! twc-sem - Checker (semantic analyzer)
//!
//! Consumes the parse tree produced by [`twc_par`] and builds the program's
//! SemIR: a [`type_store::TypeStore`], [`symbol_table::SymbolTable`],
//! [`inst_store::InstStore`], and [`float_store::FloatStore`], emitting a
//! `TWCHECK0NN` diagnostic for every rule violated along the way. A failed
//! check still returns whatever SemIR it managed to build; callers check
//! [`checker::CheckResult::succeeded`] before handing it to codegen.

pub mod checker;
#[cfg(test)]
mod edge_cases;
pub mod float_store;
pub mod inst_store;
pub mod symbol_table;
pub mod type_store;

pub use checker::{check, CheckResult};
pub use float_store::{FloatId, FloatStore};
pub use inst_store::{Inst, InstId, InstKind, InstStore};
pub use symbol_table::{Slot, SymbolId, SymbolTable};
pub use type_store::{TypeId, TypeKind, TypeStore};

use twc_par::{Parser, TokenStore};
use twc_util::Handler;

/// Lexes, parses, and checks `source` in one step.
pub fn check_source(source: &str, handler: &mut Handler) -> CheckResult {
    let tokens = TokenStore::lex(source, handler);
    let parse = Parser::new(&tokens, handler).parse_program();
    let result = check(&parse.nodes, &tokens, handler);
    if !parse.succeeded {
        CheckResult { succeeded: false, ..result }
    } else {
        result
    }
}
