//! kuchiki DOM helpers shared by the highlighter and the table model

pub(crate) mod node_util;
