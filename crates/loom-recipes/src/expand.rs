//! ---
//! loom_section: "02-recipes"
//! loom_subsection: "expand"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Structural skeleton expansion: recipe + spec -> unimplemented component skeleton."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use indexmap::IndexMap;
use loom_blueprint::ConfigValue;

use crate::registry::Recipe;

/// A structural skeleton for one component: class/identifier name, merged
/// config, declared ports, and the base primitive it instantiates — but no
/// behavior. The primary method is present only as a stub that signals
/// "implementation required" with a distinguished error; this is the
/// expander's entire contract and it is deliberately incapable of doing more.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub class_name: String,
    pub base_primitive_name: &'static str,
    pub primary_method: &'static str,
    pub merged_config: IndexMap<String, ConfigValue>,
    pub source_text: String,
}

/// Expands a [`Recipe`] plus a component's name/merged-config into a
/// [`Skeleton`]. Never embeds defaults that would let validation pass
/// without real logic — the skeleton's primary method always raises
/// "implementation required".
pub fn expand(
    component_name: &str,
    recipe: &Recipe,
    merged_config: IndexMap<String, ConfigValue>,
) -> Skeleton {
    let class_name = format!("Generated{}_{}", recipe.kind, component_name);
    let primary_method = recipe.base_primitive.primary_method();
    let source_text = render_skeleton_source(&class_name, recipe, primary_method);

    Skeleton {
        class_name,
        base_primitive_name: base_primitive_label(recipe),
        primary_method,
        merged_config,
        source_text,
    }
}

fn base_primitive_label(recipe: &Recipe) -> &'static str {
    match recipe.base_primitive {
        crate::registry::BasePrimitive::Source => "Source",
        crate::registry::BasePrimitive::Sink => "Sink",
        crate::registry::BasePrimitive::Transformer => "Transformer",
        crate::registry::BasePrimitive::Splitter => "Splitter",
        crate::registry::BasePrimitive::Merger => "Merger",
    }
}

fn render_skeleton_source(class_name: &str, recipe: &Recipe, primary_method: &'static str) -> String {
    let base = base_primitive_label(recipe);
    let mut body = String::new();
    body.push_str(&format!("class {class_name}({base}):\n"));
    body.push_str(&format!("    \"\"\"{}\"\"\"\n\n", recipe.description));
    body.push_str("    def __init__(self, name, config):\n");
    body.push_str("        super().__init__(name, config)\n\n");
    body.push_str(&format!("    async def {primary_method}(self, *args, **kwargs):\n"));
    body.push_str("        raise ImplementationRequiredError(\n");
    body.push_str(&format!(
        "            component=\"{class_name}\", method=\"{primary_method}\"\n"
    ));
    body.push_str("        )\n");
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RecipeRegistry, StaticRecipeRegistry};

    #[test]
    fn expands_store_recipe_into_unimplemented_skeleton() {
        let registry = StaticRecipeRegistry;
        let recipe = registry.get("Store").unwrap();
        let skeleton = expand("orders_store", recipe, recipe.config_defaults.clone());
        assert_eq!(skeleton.class_name, "GeneratedStore_orders_store");
        assert_eq!(skeleton.primary_method, "transform");
        assert!(skeleton.source_text.contains("ImplementationRequiredError"));
        assert!(skeleton.merged_config.contains_key("idempotency_check"));
    }
}
