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

//! It prints the rules with their attribute dictionaries and, in debug mode, what each alternative defines.

use crate::ast::*;
use crate::grammar::Grammar;

pub struct RulePrinter<'a>
{
  grammar: &'a Grammar,
  level: PrintLevel
}

impl<'a> RulePrinter<'a>
{
  pub fn new(grammar: &'a Grammar, level: PrintLevel) -> Self {
    RulePrinter {
      grammar: grammar,
      level: level
    }
  }

  pub fn render(&self) -> String {
    let mut out = format!("{} grammar {}\n", self.grammar.kind, self.grammar.name);
    for rule in &self.grammar.rules {
      out.push_str(&format!("  {}", rule));
      if rule.is_start_rule {
        out.push_str(" (start)");
      }
      if rule.is_fragment() {
        out.push_str(" (fragment)");
      }
      out.push('\n');
      if self.level.debug() {
        for alt in rule.alts() {
          out.push_str(&format!("    alt {}:", alt.alt_num));
          out.push_str(&format!(" labels={}", sorted(alt.label_defs.keys())));
          out.push_str(&format!(" tokens={}", sorted(alt.token_refs.keys())));
          out.push_str(&format!(" rules={}", sorted(alt.rule_refs.keys())));
          out.push_str(&format!(" actions={}\n", alt.actions.len()));
        }
      }
    }
    out
  }
}

fn sorted<'b, I: Iterator<Item=&'b String>>(names: I) -> String {
  let mut names: Vec<&str> = names.map(|n| n.as_str()).collect();
  names.sort();
  format!("[{}]", names.join(", "))
}
