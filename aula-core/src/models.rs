// Aula - A training and content platform backend built with Rust
// Copyright (C) 2026 Aula Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

pub mod blog_post;
pub mod comment;
pub mod enrollment;
pub mod page_settings;
pub mod product;
pub mod session;
pub mod student;
pub mod training;
pub mod user;

pub use blog_post::*;
pub use comment::*;
pub use enrollment::*;
pub use page_settings::*;
pub use product::*;
pub use session::*;
pub use student::*;
pub use training::*;
pub use user::*;
