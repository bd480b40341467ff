//! Call protocol.
//!
//! A callee name resolves to a user algorithm first, then a builtin, then a
//! command of the attached micro-world.

use super::Interpreter;
use crate::builtins::{BuiltinContext, BuiltinSpec};
use crate::coerce::coerce;
use crate::diagnostics::CallFrame;
use crate::environment::Slot;
use crate::errors::{
    missing_result, no_result_value, type_mismatch, undefined_algorithm, world_failure,
    EvalResult,
};
use crate::exec::call::{check_arg_count, require_place, ArgPass, ResolvedPlace};
use crate::exec::control::{ExprResult, Signal, Unwind};
use crate::stack::ensure_sufficient_stack;
use crate::value::{Table, Value, TABLE_TYPE_NAME};
use crate::world::WorldCommand;
use kumir_ir::{Algorithm, Expr, Name, Param, Span};

impl Interpreter<'_> {
    pub(crate) fn is_callable(&self, name: Name) -> bool {
        self.algorithms.get(name).is_some()
            || self.builtins.get(name).is_some()
            || self.world.as_ref().is_some_and(|w| w.commands.contains_key(&name))
    }

    /// Call from inside an expression: the callee must yield a value.
    pub(crate) fn eval_call(&mut self, callee: Name, args: &[Expr], span: Span) -> ExprResult<Value> {
        match self.call(callee, args, span)? {
            Some(value) => Ok(value),
            None => Err(no_result_value(self.display(callee)).into()),
        }
    }

    /// Call as a statement or from an expression. `None` for procedures.
    pub(crate) fn call(&mut self, callee: Name, args: &[Expr], span: Span) -> ExprResult<Option<Value>> {
        if let Some(algorithm) = self.algorithms.get(callee) {
            return ensure_sufficient_stack(|| self.call_algorithm(algorithm, args, span));
        }
        if let Some(spec) = self.builtins.get(callee) {
            return self.call_builtin(spec, args);
        }
        let command = self
            .world
            .as_ref()
            .and_then(|w| w.commands.get(&callee).copied());
        match command {
            Some(command) => Ok(self.call_world(command, args)?),
            None => Err(undefined_algorithm(self.display(callee)).into()),
        }
    }

    /// Prepare one actual argument in the caller's scope.
    ///
    /// Table formals always start from a copy of the actual table, `рез`
    /// included, so the callee sees the caller's bounds.
    fn prepare_arg(&mut self, param: &Param, arg: &Expr, callee: &str, position: usize) -> ExprResult<ArgPass> {
        if !param.mode.copies_back() {
            return Ok(ArgPass::Value(self.eval_expr(arg)?));
        }
        let place = require_place(arg.as_place(), callee, position).map_err(|e| e.with_span(arg.span))?;
        let place = self.resolve_place(&place)?;
        if param.mode.copies_in() || param.is_table {
            let value = self.read_place(&place).map_err(|e| e.with_span(arg.span))?;
            Ok(ArgPass::InOut(place, value))
        } else {
            Ok(ArgPass::Out(place))
        }
    }

    /// Run a user algorithm.
    ///
    /// Arguments are prepared in the caller, formals are bound in a fresh
    /// call frame, and `рез`/`аргрез` values are written back to the
    /// caller's places only after that frame is gone. `выход` outside any
    /// loop ends the algorithm normally; `стоп` unwinds the whole run.
    #[tracing::instrument(level = "debug", skip_all, fields(algorithm = self.display(algorithm.name)))]
    fn call_algorithm(&mut self, algorithm: &Algorithm, args: &[Expr], span: Span) -> ExprResult<Option<Value>> {
        let display = self.display(algorithm.name);
        check_arg_count(display, algorithm.params.len(), args.len())?;

        let mut passes = Vec::with_capacity(args.len());
        for (position, (param, arg)) in algorithm.params.iter().zip(args).enumerate() {
            passes.push(self.prepare_arg(param, arg, display, position)?);
        }

        let frame = CallFrame {
            name: algorithm.name,
            call_span: span,
        };
        let (result, copy_back) = {
            let mut scoped = self.scoped_call(frame)?;
            match scoped.run_algorithm_body(algorithm, &passes) {
                Ok(outcome) => outcome,
                Err(unwind) => {
                    let interner = scoped.interner;
                    return Err(unwind.map_error(|e| scoped.call_stack.attach_backtrace(e, interner)));
                }
            }
        };

        for (pass, value) in passes.iter().zip(copy_back) {
            if let (Some(place), Some(value)) = (pass.place(), value) {
                self.write_place(place, value).map_err(|e| e.with_span(place.span))?;
            }
        }
        Ok(result)
    }

    /// Body of `call_algorithm` inside the callee frame. Returns the result
    /// and, per parameter, the final value to copy back.
    fn run_algorithm_body(
        &mut self,
        algorithm: &Algorithm,
        passes: &[ArgPass],
    ) -> ExprResult<(Option<Value>, Vec<Option<Value>>)> {
        for (param, pass) in algorithm.params.iter().zip(passes) {
            self.bind_param(param, pass)?;
        }
        if let Some(ty) = algorithm.result {
            self.env
                .declare(Name::RESULT, Slot::uninit(ty))
                .map_err(|e| e.into_eval(self.display(Name::RESULT)))?;
        }

        match self.exec_block(&algorithm.body)? {
            Signal::Halt => return Err(Unwind::Halt),
            Signal::Normal | Signal::Break => {}
        }

        let result = match algorithm.result {
            Some(_) => match self.env.find(Name::RESULT) {
                Some(slot) if slot.is_initialized() => Some(slot.value().clone()),
                _ => return Err(missing_result(self.display(algorithm.name)).into()),
            },
            None => None,
        };
        let copy_back = algorithm
            .params
            .iter()
            .map(|param| {
                if !param.mode.copies_back() {
                    return None;
                }
                self.env
                    .find(param.name)
                    .filter(|slot| slot.is_initialized())
                    .map(|slot| slot.value().clone())
            })
            .collect();
        Ok((result, copy_back))
    }

    fn bind_param(&mut self, param: &Param, pass: &ArgPass) -> ExprResult<()> {
        let display = self.display(param.name);
        let (slot, initial) = match (param.is_table, pass.initial()) {
            (true, Some(value)) => (Slot::table(param_table(param, value)?), None),
            (false, Some(value)) => (Slot::scalar(param.ty), Some(value.clone())),
            (_, None) => (Slot::uninit(param.ty), None),
        };
        self.env
            .declare(param.name, slot)
            .map_err(|e| e.into_eval(display).with_span(param.span))?;
        if let Some(value) = initial {
            self.env
                .update(param.name, value)
                .map_err(|e| e.into_eval(display).with_span(param.span))?;
        }
        Ok(())
    }

    /// Dispatch to a builtin. `рез`/`аргрез` positions are read from and
    /// written back to the caller's places around the handler.
    #[tracing::instrument(level = "debug", skip_all, fields(builtin = spec.name))]
    fn call_builtin(&mut self, spec: &'static BuiltinSpec, args: &[Expr]) -> ExprResult<Option<Value>> {
        spec.check_arity(args.len())?;

        let mut values = Vec::with_capacity(args.len());
        let mut places = Vec::with_capacity(args.len());
        for (position, arg) in args.iter().enumerate() {
            let pass = self.prepare_builtin_arg(spec, position, arg)?;
            values.push(pass.0);
            places.push(pass.1);
        }
        spec.check_types(&values)?;

        let result = {
            let mut ctx = BuiltinContext { rng: &mut self.rng };
            (spec.handler)(&mut ctx, &mut values)?
        };

        for (place, value) in places.iter().zip(values) {
            if let Some(place) = place {
                self.write_place(place, value).map_err(|e| e.with_span(place.span))?;
            }
        }
        Ok(result)
    }

    fn prepare_builtin_arg(
        &mut self,
        spec: &BuiltinSpec,
        position: usize,
        arg: &Expr,
    ) -> ExprResult<(Value, Option<ResolvedPlace>)> {
        let mode = spec.mode(position);
        if !mode.copies_back() {
            return Ok((self.eval_expr(arg)?, None));
        }
        let place = require_place(arg.as_place(), spec.name, position).map_err(|e| e.with_span(arg.span))?;
        let place = self.resolve_place(&place)?;
        let value = if mode.copies_in() {
            self.read_place(&place)
        } else {
            self.read_place_or_default(&place)
        }
        .map_err(|e| e.with_span(arg.span))?;
        Ok((value, Some(place)))
    }

    /// Forward a command to the micro-world, arguments coerced to its
    /// parameter types.
    #[tracing::instrument(level = "debug", skip_all, fields(command = command.name))]
    fn call_world(&mut self, command: WorldCommand, args: &[Expr]) -> ExprResult<Option<Value>> {
        check_arg_count(command.name, command.params.len(), args.len())?;
        let mut values = Vec::with_capacity(args.len());
        for (arg, ty) in args.iter().zip(command.params) {
            let value = self.eval_expr(arg)?;
            values.push(coerce(value, *ty).map_err(|e| e.with_span(arg.span))?);
        }

        let Some(binding) = self.world.as_mut() else {
            return Err(undefined_algorithm(command.name).into());
        };
        let reply = match binding.world.execute(command.name, &values) {
            Ok(reply) => reply,
            Err(e) => return Err(world_failure(binding.world.name(), &e.to_string()).into()),
        };

        match (command.result, reply) {
            (Some(ty), Some(value)) => Ok(Some(coerce(value, ty)?)),
            (Some(ty), None) => Err(world_failure(
                binding.world.name(),
                &format!(
                    "команда '{}' не вернула значение типа {}",
                    command.name,
                    ty.keyword()
                ),
            )
            .into()),
            (None, _) => Ok(None),
        }
    }
}

/// Copy of the actual table for a table formal; element type must match and,
/// when the formal declares bounds, so must the dimension count.
fn param_table(param: &Param, actual: &Value) -> EvalResult<Table> {
    match actual {
        Value::Table(table)
            if table.element_type() == param.ty
                && (param.bounds.is_empty() || table.rank() == param.bounds.len()) =>
        {
            Ok(table.clone())
        }
        other => Err(type_mismatch(
            &format!("{TABLE_TYPE_NAME} {}", param.ty.keyword()),
            other.type_name(),
        )
        .with_span(param.span)),
    }
}
