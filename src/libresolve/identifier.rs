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

pub use proc_macro2::Span;

pub trait ItemName
{
  fn name(&self) -> &str;
}

pub trait ItemSpan
{
  fn span(&self) -> Span;
}

impl<InnerItem: ItemName> ItemName for &InnerItem
{
  fn name(&self) -> &str {
    (*self).name()
  }
}

impl<InnerItem: ItemSpan> ItemSpan for &InnerItem
{
  fn span(&self) -> Span {
    (*self).span()
  }
}

/// Renders the position of `span` as `line:column` with a 1-based column.
pub fn display_position(span: Span) -> String {
  let start = span.start();
  format!("{}:{}", start.line, start.column + 1)
}
