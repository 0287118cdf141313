//! Field-order resolution for views and queries.
//!
//! Every order is computed on demand from the model's resolved record; nothing
//! is cached, so repeated calls return identical lists.

use std::collections::HashSet;

use tracing::trace;

use crate::error::Result;
use crate::model::Model;
use crate::tabs::flatten_tabs;
use crate::types::{QueryPurpose, View};

impl Model {
    /// Explicit order for a view: the tab tree for `detail`, else the declared override.
    fn explicit_order(&self, view: View) -> Result<Option<Vec<String>>> {
        if view == View::Detail {
            if let Some(tabs) = &self.detail_tabs {
                return flatten_tabs(&self.name, &self.fields, tabs).map(Some);
            }
        }

        match self.view_override(view) {
            Some(order) => {
                for name in order {
                    self.field(name)?;
                }
                Ok(Some(order.to_vec()))
            }
            None => Ok(None),
        }
    }

    /// Ordered field names shown in `view`.
    ///
    /// An override is returned as declared, repeats included. Without one,
    /// `field_order` is filtered by the view's `show_<view>` flag.
    pub fn view_field_order(&self, view: View) -> Result<Vec<String>> {
        self.ensure_linked()?;

        if let Some(order) = self.explicit_order(view)? {
            trace!(model = %self.name, view = view.as_str(), "using explicit order");
            return Ok(order);
        }

        let show = view.show_flag();
        let mut out = Vec::new();
        for name in &self.field_order {
            if show(self.field(name)?) {
                out.push(name.clone());
            }
        }
        Ok(out)
    }

    /// Ordered, duplicate-free field names to request for `purpose`.
    ///
    /// `query_required_fields` always lead. The view override (or detail tab
    /// order) follows when one exists; otherwise every field the view shows or
    /// the query includes. Virtual fields are never requested.
    pub fn query_fields(&self, purpose: QueryPurpose) -> Result<Vec<String>> {
        self.ensure_linked()?;

        let mut placed: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        for name in &self.query_required_fields {
            self.field(name)?;
            if placed.insert(name) {
                out.push(name.clone());
            }
        }

        if let Some(order) = self.explicit_order(purpose.view())? {
            for name in order {
                let field = self.field(&name)?;
                if field.is_virtual || placed.contains(name.as_str()) {
                    continue;
                }
                placed.insert(field.name.as_str());
                out.push(name);
            }
            return Ok(out);
        }

        for name in &self.field_order {
            let field = self.field(name)?;
            if !placed.contains(name.as_str()) && field.queried_for(purpose) {
                placed.insert(name);
                out.push(name.clone());
            }
        }
        Ok(out)
    }

    pub fn index_field_order(&self) -> Result<Vec<String>> {
        self.view_field_order(View::Index)
    }

    pub fn create_field_order(&self) -> Result<Vec<String>> {
        self.view_field_order(View::Create)
    }

    pub fn detail_field_order(&self) -> Result<Vec<String>> {
        self.view_field_order(View::Detail)
    }

    pub fn tooltip_field_order(&self) -> Result<Vec<String>> {
        self.view_field_order(View::Tooltip)
    }

    pub fn query_list_fields(&self) -> Result<Vec<String>> {
        self.query_fields(QueryPurpose::List)
    }

    pub fn query_single_fields(&self) -> Result<Vec<String>> {
        self.query_fields(QueryPurpose::Single)
    }
}
