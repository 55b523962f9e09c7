// Copyright 2014 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This is the developer documentation of the attribute resolution layer of a grammar-driven parser generator. Grammar authors write semantic actions referencing the state of the rule they belong to: arguments, return values, labels bound to sub-elements and predefined properties such as `$text` or `$start`. This library maps every such reference to the attribute it denotes, or reports it as unresolved.
//!
//! The grammar model is built once by an AST walker (`Grammar::define_rule`, `Grammar::define_action_in_alt`, ...), then it is only queried through the `AttributeResolver` trait. The `middle` module is the main consumer of this surface: it checks every reference found in the actions of the grammar and reports the misses as positioned diagnostics.

pub use ast::*;
pub use attribute::{Attribute, AttributeDict, DictType};
pub use scope::{ScopeKey, PredefinedScopes};
pub use alternative::Alternative;
pub use rule::Rule;
pub use grammar::{Grammar, ActionRegistry, GrammarAttributes};
pub use resolver::{AttributeResolver, RuleResolver};
pub use diagnostic::{Diagnostic, Diagnostics, Level, SemanticError, StructuralError};
pub use front::action::{AttrRef, attribute_refs, parse_action};
pub use middle::check;

pub mod ast;
pub mod identifier;
pub mod attribute;
pub mod scope;
pub mod alternative;
pub mod rule;
pub mod grammar;
pub mod resolver;
pub mod diagnostic;
pub mod front;
pub mod middle;
