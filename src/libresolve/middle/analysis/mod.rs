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

use crate::ast::*;
use crate::grammar::Grammar;
use crate::diagnostic::Diagnostics;
use self::duplicate::*;
use self::undeclared_rule::*;
use self::start_rule::*;
use self::label_conflict::*;
use self::attribute_ref::*;

mod duplicate;
mod undeclared_rule;
mod start_rule;
mod label_conflict;
mod attribute_ref;

pub fn analyse(grammar: Grammar, diagnostics: &Diagnostics) -> Partial<Grammar> {
  let result = Partial::Value(grammar)
    .and_then(|grammar| rule_duplicate(grammar, diagnostics))
    .and_then(|grammar| attribute_duplicate(grammar, diagnostics))
    .and_then(|grammar| UndeclaredRule::analyse(grammar, diagnostics))
    .and_then(|grammar| mark_start_rules(grammar))
    .and_then(|grammar| LabelConflict::analyse(grammar, diagnostics))
    .and_then(|grammar| AttributeRefs::analyse(grammar, diagnostics));
  tracing::debug!(errors = diagnostics.error_count(), "grammar analysis done");
  result
}
