// Copyright 2016 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Checks the grammar model once the walker is done with it: every reference found in the actions is resolved and the misses are reported as diagnostics.
//!
//! The passes are chained with `Partial`: a pass that reports an error gives a `Fake` grammar so the following passes still run and report their own errors in the same run.

use crate::ast::*;
use crate::grammar::Grammar;
use crate::diagnostic::*;
use self::rule_printer::RulePrinter;

pub mod analysis;
pub mod attribute;
pub mod rule_printer;

pub fn check(grammar: Grammar, attributes: &[syn::Attribute], diagnostics: &Diagnostics)
  -> Partial<Grammar>
{
  Partial::Value(grammar)
    .and_then(|grammar| at_least_one_rule_declared(grammar, diagnostics))
    .and_then(|grammar| attribute::decorate_with_attributes(grammar, attributes, diagnostics))
    .and_then(|grammar| analysis::analyse(grammar, diagnostics))
    .map(|grammar| print_rules(grammar))
}

fn at_least_one_rule_declared(grammar: Grammar, diagnostics: &Diagnostics) -> Partial<Grammar> {
  if grammar.rules.is_empty() {
    diagnostics.span_err(Span::call_site(), SemanticError::NoRule);
    Partial::Nothing
  } else {
    Partial::Value(grammar)
  }
}

fn print_rules(grammar: Grammar) -> Grammar {
  let level = grammar.attributes.print_rules;
  if level.show() || level.debug() {
    println!("{}", RulePrinter::new(&grammar, level).render());
  }
  grammar
}
