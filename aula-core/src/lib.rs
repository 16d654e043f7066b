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

pub mod models;
pub mod utils;

pub use models::blog_post::BlogPost;
pub use models::comment::{Comment, CommentTarget, CommentThread, Reply};
pub use models::enrollment::{Enrollment, EnrollmentSource, EnrollmentStatus};
pub use models::page_settings::TrainingPageSettings;
pub use models::product::Product;
pub use models::session::Session;
pub use models::student::Student;
pub use models::training::Training;
pub use models::user::User;
