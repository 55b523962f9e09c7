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

//! A rule is a start rule as long as no other rule references it.

use crate::ast::*;
use crate::grammar::Grammar;
use partial::Partial::*;
use std::collections::HashSet;

pub fn mark_start_rules(mut grammar: Grammar) -> Partial<Grammar> {
  let referenced: HashSet<String> = grammar.rules.iter()
    .flat_map(|rule| {
      let caller = rule.name.clone();
      rule.get_rule_refs().into_iter()
        .filter(move |callee| *callee != caller)
    })
    .collect();
  for rule in &mut grammar.rules {
    rule.is_start_rule = !referenced.contains(&rule.name);
  }
  Value(grammar)
}
