//! Scope-aware feature classification over one syntax tree
//!
//! A single-pass, pre-order, depth-first walk driven by explicit rules per
//! node kind. Node kinds without a detection rule recurse through an
//! explicit list of child fields; nothing is discovered by reflection, so
//! what gets traversed is auditable from the match arms below.

use crate::compat::{CompatIndex, FeatureId, SyntaxFeature};
use crate::core::scope::ScopeSet;
use crate::core::tokens::TokenTable;
use crate::parsers::ast_parser::ModuleMetadata;
use oxc_ast::ast::*;
use oxc_syntax::operator::LogicalOperator;

/// Classifies one file's syntax tree into a token table.
///
/// Syntax features register unconditionally at their knowledge-base version.
/// Global/API detections are suppressed for names the [`ScopeSet`] has seen
/// a local declaration for, and dropped silently when the knowledge base has
/// no unconditional support record.
pub struct FeatureClassifier<'k> {
    index: &'k CompatIndex,
    scope: ScopeSet,
    tokens: TokenTable,
}

impl<'k> FeatureClassifier<'k> {
    /// Walk a program and produce its token table.
    pub fn classify<'a>(
        index: &'k CompatIndex,
        program: &Program<'a>,
        metadata: &ModuleMetadata,
    ) -> TokenTable {
        let mut classifier = Self {
            index,
            scope: ScopeSet::new(),
            tokens: TokenTable::new(),
        };

        classifier.register_module_features(metadata);
        for stmt in &program.body {
            classifier.visit_statement(stmt);
        }
        classifier.tokens
    }

    fn register_syntax(&mut self, feature: SyntaxFeature) {
        if let Some(version) = self.index.syntax_version(feature) {
            self.tokens.insert(FeatureId::Syntax(feature), version);
        }
    }

    fn register_api(&mut self, name: &str) {
        if let Some(version) = self.index.api_version(name) {
            self.tokens.insert(FeatureId::api(name), version);
        }
    }

    /// Bare identifier in a classifying position: look it up unless a local
    /// declaration shadows it.
    fn classify_identifier(&mut self, ident: &IdentifierReference<'_>) {
        if !self.scope.contains(ident.name.as_str()) {
            self.register_api(ident.name.as_str());
        }
    }

    /// Module-level detections come from the parser's module metadata.
    /// The `node:` specifier prefix resolved at different versions for ESM
    /// and CJS, hence the two distinct features.
    fn register_module_features(&mut self, metadata: &ModuleMetadata) {
        if metadata.has_module_syntax {
            self.register_syntax(SyntaxFeature::Esm);
        }

        if metadata
            .static_imports
            .iter()
            .any(|import| import.source.starts_with("node:"))
        {
            let feature = if metadata.has_module_syntax {
                SyntaxFeature::NodeProtocolEsm
            } else {
                SyntaxFeature::NodeProtocolCjs
            };
            self.register_syntax(feature);
        }

        if metadata.has_json_import_attribute() {
            self.register_syntax(SyntaxFeature::ImportAttributes);
        }
    }

    fn visit_statement<'a>(&mut self, stmt: &Statement<'a>) {
        match stmt {
            Statement::VariableDeclaration(decl) => self.visit_variable_declaration(decl),
            Statement::FunctionDeclaration(func) => self.visit_function(func),
            Statement::ClassDeclaration(class) => {
                self.register_syntax(SyntaxFeature::ClassDeclaration);
                self.visit_class(class);
            }
            Statement::ExpressionStatement(stmt) => self.visit_expression(&stmt.expression),
            Statement::BlockStatement(block) => {
                for stmt in &block.body {
                    self.visit_statement(stmt);
                }
            }
            Statement::IfStatement(stmt) => {
                self.visit_expression(&stmt.test);
                self.visit_statement(&stmt.consequent);
                if let Some(alternate) = &stmt.alternate {
                    self.visit_statement(alternate);
                }
            }
            Statement::ForStatement(stmt) => {
                if let Some(init) = &stmt.init {
                    match init {
                        ForStatementInit::VariableDeclaration(decl) => {
                            self.visit_variable_declaration(decl)
                        }
                        _ => {
                            if let Some(expr) = init.as_expression() {
                                self.visit_expression(expr);
                            }
                        }
                    }
                }
                if let Some(test) = &stmt.test {
                    self.visit_expression(test);
                }
                if let Some(update) = &stmt.update {
                    self.visit_expression(update);
                }
                self.visit_statement(&stmt.body);
            }
            Statement::ForInStatement(stmt) => {
                self.visit_for_target(&stmt.left);
                self.visit_expression(&stmt.right);
                self.visit_statement(&stmt.body);
            }
            Statement::ForOfStatement(stmt) => {
                self.visit_for_target(&stmt.left);
                self.visit_expression(&stmt.right);
                self.visit_statement(&stmt.body);
            }
            Statement::WhileStatement(stmt) => {
                self.visit_expression(&stmt.test);
                self.visit_statement(&stmt.body);
            }
            Statement::DoWhileStatement(stmt) => {
                self.visit_statement(&stmt.body);
                self.visit_expression(&stmt.test);
            }
            Statement::ReturnStatement(stmt) => {
                if let Some(argument) = &stmt.argument {
                    self.visit_expression(argument);
                }
            }
            Statement::ThrowStatement(stmt) => self.visit_expression(&stmt.argument),
            Statement::TryStatement(stmt) => {
                for stmt in &stmt.block.body {
                    self.visit_statement(stmt);
                }
                if let Some(handler) = &stmt.handler {
                    for stmt in &handler.body.body {
                        self.visit_statement(stmt);
                    }
                }
                if let Some(finalizer) = &stmt.finalizer {
                    for stmt in &finalizer.body {
                        self.visit_statement(stmt);
                    }
                }
            }
            Statement::SwitchStatement(stmt) => {
                self.visit_expression(&stmt.discriminant);
                for case in &stmt.cases {
                    if let Some(test) = &case.test {
                        self.visit_expression(test);
                    }
                    for stmt in &case.consequent {
                        self.visit_statement(stmt);
                    }
                }
            }
            Statement::LabeledStatement(stmt) => self.visit_statement(&stmt.body),
            Statement::WithStatement(stmt) => {
                self.visit_expression(&stmt.object);
                self.visit_statement(&stmt.body);
            }
            Statement::ExportNamedDeclaration(decl) => {
                if let Some(declaration) = &decl.declaration {
                    self.visit_declaration(declaration);
                }
            }
            Statement::ExportDefaultDeclaration(decl) => {
                self.visit_export_default(&decl.declaration)
            }
            // Import declarations are covered by the module metadata rules;
            // break/continue/empty/debugger carry nothing.
            _ => {}
        }
    }

    fn visit_declaration<'a>(&mut self, decl: &Declaration<'a>) {
        match decl {
            Declaration::VariableDeclaration(decl) => self.visit_variable_declaration(decl),
            Declaration::FunctionDeclaration(func) => self.visit_function(func),
            Declaration::ClassDeclaration(class) => {
                self.register_syntax(SyntaxFeature::ClassDeclaration);
                self.visit_class(class);
            }
            _ => {}
        }
    }

    fn visit_export_default<'a>(&mut self, decl: &ExportDefaultDeclarationKind<'a>) {
        match decl {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => self.visit_function(func),
            ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                self.register_syntax(SyntaxFeature::ClassDeclaration);
                self.visit_class(class);
            }
            _ => {
                if let Some(expr) = decl.as_expression() {
                    self.visit_expression(expr);
                }
            }
        }
    }

    /// Each declared name enters the scope before its initializer is
    /// traversed, so references inside the initializer are already
    /// suppressed, and so are all later references in the file.
    fn visit_variable_declaration<'a>(&mut self, decl: &VariableDeclaration<'a>) {
        for declarator in &decl.declarations {
            if let BindingPatternKind::BindingIdentifier(ident) = &declarator.id.kind {
                self.scope.declare(ident.name.as_str());
            }
            if let Some(init) = &declarator.init {
                self.visit_expression(init);
            }
        }
    }

    fn visit_for_target<'a>(&mut self, left: &ForStatementLeft<'a>) {
        if let ForStatementLeft::VariableDeclaration(decl) = left {
            self.visit_variable_declaration(decl);
        }
    }

    fn visit_function<'a>(&mut self, func: &Function<'a>) {
        for param in &func.params.items {
            self.visit_binding_pattern(&param.pattern);
        }
        if let Some(body) = &func.body {
            for stmt in &body.statements {
                self.visit_statement(stmt);
            }
        }
    }

    /// Binding patterns carry no detections themselves but default values
    /// are arbitrary expressions.
    fn visit_binding_pattern<'a>(&mut self, pattern: &BindingPattern<'a>) {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(_) => {}
            BindingPatternKind::AssignmentPattern(pat) => {
                self.visit_binding_pattern(&pat.left);
                self.visit_expression(&pat.right);
            }
            BindingPatternKind::ObjectPattern(pat) => {
                for property in &pat.properties {
                    self.visit_binding_pattern(&property.value);
                }
            }
            BindingPatternKind::ArrayPattern(pat) => {
                for element in pat.elements.iter().flatten() {
                    self.visit_binding_pattern(element);
                }
            }
        }
    }

    fn visit_class<'a>(&mut self, class: &Class<'a>) {
        if let Some(super_class) = &class.super_class {
            self.visit_expression(super_class);
        }
        for element in &class.body.body {
            match element {
                ClassElement::MethodDefinition(method) => {
                    if matches!(&method.key, PropertyKey::PrivateIdentifier(_)) {
                        self.register_syntax(SyntaxFeature::PrivateIdentifier);
                    }
                    self.visit_function(&method.value);
                }
                ClassElement::PropertyDefinition(property) => {
                    if matches!(&property.key, PropertyKey::PrivateIdentifier(_)) {
                        self.register_syntax(SyntaxFeature::PrivateIdentifier);
                    }
                    if let Some(value) = &property.value {
                        self.visit_expression(value);
                    }
                }
                ClassElement::AccessorProperty(property) => {
                    if matches!(&property.key, PropertyKey::PrivateIdentifier(_)) {
                        self.register_syntax(SyntaxFeature::PrivateIdentifier);
                    }
                    if let Some(value) = &property.value {
                        self.visit_expression(value);
                    }
                }
                ClassElement::StaticBlock(block) => {
                    for stmt in &block.body {
                        self.visit_statement(stmt);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_expression<'a>(&mut self, expr: &Expression<'a>) {
        match expr {
            Expression::AwaitExpression(await_expr) => {
                self.register_syntax(SyntaxFeature::Await);
                self.visit_expression(&await_expr.argument);
            }
            Expression::ChainExpression(chain) => self.visit_chain(chain),
            Expression::TemplateLiteral(template) => self.visit_template_literal(template),
            Expression::TaggedTemplateExpression(tagged) => {
                self.visit_expression(&tagged.tag);
                self.visit_template_literal(&tagged.quasi);
            }
            Expression::LogicalExpression(logical) => {
                if logical.operator == LogicalOperator::Coalesce {
                    self.register_syntax(SyntaxFeature::NullishCoalescing);
                }
                self.visit_expression(&logical.left);
                self.visit_expression(&logical.right);
            }
            Expression::NewExpression(new_expr) => {
                if let Expression::Identifier(ident) = &new_expr.callee {
                    self.classify_identifier(ident);
                } else {
                    self.visit_expression(&new_expr.callee);
                }
                for argument in &new_expr.arguments {
                    self.visit_argument(argument);
                }
            }
            Expression::AssignmentExpression(assign) => {
                if let AssignmentTarget::AssignmentTargetIdentifier(ident) = &assign.left {
                    self.classify_identifier(ident);
                }
                self.visit_expression(&assign.right);
            }
            Expression::CallExpression(call) => self.visit_call_expression(call),
            Expression::StaticMemberExpression(member) => self.visit_static_member(member),
            Expression::ComputedMemberExpression(member) => self.visit_computed_member(member),
            Expression::PrivateFieldExpression(member) => self.visit_private_field(member),
            Expression::PrivateInExpression(private_in) => {
                self.register_syntax(SyntaxFeature::PrivateIdentifier);
                self.visit_expression(&private_in.right);
            }
            Expression::ImportExpression(import_expr) => {
                self.register_syntax(SyntaxFeature::DynamicImport);
                self.visit_expression(&import_expr.source);
            }
            Expression::ClassExpression(class) => self.visit_class(class),
            Expression::FunctionExpression(func) => self.visit_function(func),
            Expression::ArrowFunctionExpression(arrow) => {
                for param in &arrow.params.items {
                    self.visit_binding_pattern(&param.pattern);
                }
                for stmt in &arrow.body.statements {
                    self.visit_statement(stmt);
                }
            }
            Expression::ObjectExpression(object) => {
                for property in &object.properties {
                    match property {
                        ObjectPropertyKind::ObjectProperty(prop) => {
                            if prop.computed {
                                if let Some(key) = prop.key.as_expression() {
                                    self.visit_expression(key);
                                }
                            }
                            self.visit_expression(&prop.value);
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.visit_expression(&spread.argument);
                        }
                    }
                }
            }
            Expression::ArrayExpression(array) => self.visit_array_elements(array),
            Expression::ConditionalExpression(cond) => {
                self.visit_expression(&cond.test);
                self.visit_expression(&cond.consequent);
                self.visit_expression(&cond.alternate);
            }
            Expression::BinaryExpression(binary) => {
                self.visit_expression(&binary.left);
                self.visit_expression(&binary.right);
            }
            Expression::UnaryExpression(unary) => self.visit_expression(&unary.argument),
            Expression::SequenceExpression(sequence) => {
                for expr in &sequence.expressions {
                    self.visit_expression(expr);
                }
            }
            Expression::ParenthesizedExpression(paren) => {
                self.visit_expression(&paren.expression);
            }
            Expression::YieldExpression(yield_expr) => {
                if let Some(argument) = &yield_expr.argument {
                    self.visit_expression(argument);
                }
            }
            // Bare identifier reads, literals, this/super and meta
            // properties carry no detections.
            _ => {}
        }
    }

    fn visit_template_literal<'a>(&mut self, template: &TemplateLiteral<'a>) {
        self.register_syntax(SyntaxFeature::TemplateLiteral);
        for expr in &template.expressions {
            self.visit_expression(expr);
        }
    }

    /// The chain wrapper only marks that optional syntax occurred somewhere
    /// below; the actual `optional` flag sits on the member/call nodes, so
    /// detection happens there and the wrapper just dispatches.
    fn visit_chain<'a>(&mut self, chain: &ChainExpression<'a>) {
        match &chain.expression {
            ChainElement::CallExpression(call) => self.visit_call_expression(call),
            ChainElement::StaticMemberExpression(member) => self.visit_static_member(member),
            ChainElement::ComputedMemberExpression(member) => self.visit_computed_member(member),
            ChainElement::PrivateFieldExpression(member) => self.visit_private_field(member),
            _ => {}
        }
    }

    fn visit_call_expression<'a>(&mut self, call: &CallExpression<'a>) {
        if call.optional {
            self.register_syntax(SyntaxFeature::OptionalChaining);
        }

        match &call.callee {
            Expression::StaticMemberExpression(member) => {
                if member.optional {
                    self.register_syntax(SyntaxFeature::OptionalChaining);
                }
                match &member.object {
                    Expression::Identifier(ident) => {
                        if !self.scope.contains(ident.name.as_str()) {
                            self.register_api(&format!("{}.{}", ident.name, member.property.name));
                        }
                    }
                    Expression::ArrayExpression(array) => {
                        // A literal receiver is a direct method-on-builtin
                        // detection and takes precedence over the generic
                        // object/property rules for this node.
                        self.register_api(&format!("Array.prototype.{}", member.property.name));
                        self.visit_array_elements(array);
                    }
                    other => self.visit_expression(other),
                }
            }
            Expression::ComputedMemberExpression(member) => self.visit_computed_member(member),
            Expression::Identifier(ident) => self.classify_identifier(ident),
            other => self.visit_expression(other),
        }

        for argument in &call.arguments {
            self.visit_argument(argument);
        }
    }

    /// Only the root identifier of a member chain is eligible for
    /// classification; deeper property names are not looked up.
    fn classify_member_object<'a>(&mut self, object: &Expression<'a>) {
        if let Expression::Identifier(ident) = object {
            self.classify_identifier(ident);
        } else {
            self.visit_expression(object);
        }
    }

    fn visit_static_member<'a>(&mut self, member: &StaticMemberExpression<'a>) {
        if member.optional {
            self.register_syntax(SyntaxFeature::OptionalChaining);
        }
        self.classify_member_object(&member.object);
    }

    fn visit_computed_member<'a>(&mut self, member: &ComputedMemberExpression<'a>) {
        if member.optional {
            self.register_syntax(SyntaxFeature::OptionalChaining);
        }
        self.classify_member_object(&member.object);
        self.visit_expression(&member.expression);
    }

    fn visit_private_field<'a>(&mut self, member: &PrivateFieldExpression<'a>) {
        self.register_syntax(SyntaxFeature::PrivateIdentifier);
        if member.optional {
            self.register_syntax(SyntaxFeature::OptionalChaining);
        }
        self.visit_expression(&member.object);
    }

    fn visit_array_elements<'a>(&mut self, array: &ArrayExpression<'a>) {
        for element in &array.elements {
            match element {
                ArrayExpressionElement::SpreadElement(spread) => {
                    self.visit_expression(&spread.argument);
                }
                _ => {
                    if let Some(expr) = element.as_expression() {
                        self.visit_expression(expr);
                    }
                }
            }
        }
    }

    fn visit_argument<'a>(&mut self, argument: &Argument<'a>) {
        match argument {
            Argument::SpreadElement(spread) => self.visit_expression(&spread.argument),
            _ => {
                if let Some(expr) = argument.as_expression() {
                    self.visit_expression(expr);
                }
            }
        }
    }
}
