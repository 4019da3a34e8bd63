//! ProximityCoordinator — единственный владелец registry и active entity
//!
//! Чистая логика без ECS queries: мир доступен через trait ProximityScene.
//! Системы (proximity/systems.rs) реализуют ProximityScene поверх Query,
//! unit-тесты — поверх HashMap.
//!
//! Инвариант: в registry максимум один entity с TargetState::Activated,
//! и это ровно `active`. Пустой registry ⇒ active == None.

use bevy::prelude::*;
use thiserror::Error;

use crate::logger;

/// Номер binding'а координатора
///
/// Каждый `bind` начинает новое поколение со свежим registry.
/// Trackable помнит поколение, в котором зарегистрировался, и
/// перерегистрируется когда оно устарело (weak handle + polling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct CoordinatorGeneration(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    #[error("proximity coordinator already bound to listener {existing:?}, rejecting {rejected:?}")]
    AlreadyBound { existing: Entity, rejected: Entity },
}

/// Доступ координатора к миру
pub trait ProximityScene {
    /// Позиция listener'а (reference point). None — listener без Transform.
    fn reference_position(&self, listener: Entity) -> Option<Vec3>;

    /// Позиция tracked entity. None — entity пропускается в скане.
    fn position_of(&self, entity: Entity) -> Option<Vec3>;

    /// SetActivationState на entity
    fn send_state(&mut self, entity: Entity, is_activated: bool);
}

/// Один binding (живой экземпляр) координатора
#[derive(Debug, Clone)]
struct Binding {
    listener: Entity,
    generation: CoordinatorGeneration,
    /// Set с порядком вставки: порядок = порядок скана (first-wins на tie)
    registry: Vec<Entity>,
    active: Option<Entity>,
}

/// Resource: proximity-activation coordinator
///
/// Создаётся пустым (без экземпляра). Экземпляр появляется при `bind`
/// (ProximityListener добавлен) и исчезает при `unbind`.
#[derive(Resource, Debug, Default)]
pub struct ProximityCoordinator {
    binding: Option<Binding>,
    generations: u32,
}

impl ProximityCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Есть ли живой экземпляр
    pub fn is_live(&self) -> bool {
        self.binding.is_some()
    }

    pub fn listener(&self) -> Option<Entity> {
        self.binding.as_ref().map(|b| b.listener)
    }

    pub fn generation(&self) -> Option<CoordinatorGeneration> {
        self.binding.as_ref().map(|b| b.generation)
    }

    pub fn active(&self) -> Option<Entity> {
        self.binding.as_ref().and_then(|b| b.active)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|b| b.registry.contains(&entity))
    }

    /// Registry в порядке скана (пусто если экземпляра нет)
    pub fn registered(&self) -> &[Entity] {
        self.binding
            .as_ref()
            .map(|b| b.registry.as_slice())
            .unwrap_or(&[])
    }

    /// Enable: listener становится экземпляром координатора
    ///
    /// Повторный bind того же listener'а — no-op.
    /// Второй listener отклоняется (первый НЕ заменяется).
    pub fn bind(&mut self, listener: Entity) -> Result<CoordinatorGeneration, CoordinatorError> {
        if let Some(binding) = &self.binding {
            if binding.listener == listener {
                return Ok(binding.generation);
            }
            return Err(CoordinatorError::AlreadyBound {
                existing: binding.listener,
                rejected: listener,
            });
        }

        self.generations = self.generations.wrapping_add(1);
        let generation = CoordinatorGeneration(self.generations);
        self.binding = Some(Binding {
            listener,
            generation,
            registry: Vec::new(),
            active: None,
        });

        logger::log_info(&format!(
            "ProximityCoordinator bound to listener {:?} (generation {})",
            listener, generation.0
        ));
        Ok(generation)
    }

    /// Disable: снимаем экземпляр, только если listener — текущий владелец
    ///
    /// Active trackable получает deactivate до сброса binding'а:
    /// следующее поколение начинается без activated entity.
    pub fn unbind(&mut self, listener: Entity, scene: &mut impl ProximityScene) -> bool {
        if self.listener() != Some(listener) {
            return false;
        }
        if let Some(previous) = self.binding.take().and_then(|b| b.active) {
            scene.send_state(previous, false);
        }
        logger::log_info(&format!("ProximityCoordinator unbound from listener {:?}", listener));
        true
    }

    /// RegisterEntity
    ///
    /// true — экземпляр есть и entity в registry (новый entity запускает пересчёт).
    /// false — экземпляра нет, вызывающий повторяет на следующем тике.
    pub fn register(&mut self, entity: Entity, scene: &mut impl ProximityScene) -> bool {
        let Some(binding) = self.binding.as_mut() else {
            return false;
        };

        if !binding.registry.contains(&entity) {
            binding.registry.push(entity);
            logger::log(&format!(
                "Trackable {:?} registered (registry size: {})",
                entity,
                binding.registry.len()
            ));
            self.find_closest(scene);
        }
        true
    }

    /// UnregisterEntity — безусловно, отсутствие entity не ошибка
    ///
    /// Удаление присутствовавшего entity запускает пересчёт: active
    /// не может остаться указателем на entity вне registry.
    pub fn unregister(&mut self, entity: Entity, scene: &mut impl ProximityScene) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        let Some(index) = binding.registry.iter().position(|e| *e == entity) else {
            return;
        };

        // remove, не swap_remove: порядок скана сохраняется
        binding.registry.remove(index);
        if binding.active == Some(entity) {
            // Entity уже не tracked — deactivate отправляем напрямую
            binding.active = None;
            scene.send_state(entity, false);
        }
        logger::log(&format!(
            "Trackable {:?} unregistered (registry size: {})",
            entity,
            binding.registry.len()
        ));
        self.find_closest(scene);
    }

    /// ReportMotionDetected — no-op без экземпляра
    pub fn report_motion(&mut self, scene: &mut impl ProximityScene) {
        if self.binding.is_some() {
            self.find_closest(scene);
        }
    }

    /// Пересчёт nearest + broadcast переходов
    fn find_closest(&mut self, scene: &mut impl ProximityScene) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        let Some(reference) = scene.reference_position(binding.listener) else {
            return;
        };

        let closest = nearest_entity(
            reference,
            binding
                .registry
                .iter()
                .filter_map(|&entity| scene.position_of(entity).map(|pos| (entity, pos))),
        );

        if closest == binding.active {
            return;
        }

        // Порядок важен: сначала deactivate старого, потом activate нового
        if let Some(previous) = binding.active {
            scene.send_state(previous, false);
        }
        binding.active = closest;
        if let Some(next) = binding.active {
            scene.send_state(next, true);
        }

        logger::log(&format!("Closest trackable changed → {:?}", closest));
    }
}

/// Linear scan по squared distance, strict `<` (first-wins на tie)
pub fn nearest_entity(
    reference: Vec3,
    candidates: impl IntoIterator<Item = (Entity, Vec3)>,
) -> Option<Entity> {
    let mut closest = None;
    let mut closest_distance_sqr = f32::INFINITY;

    for (entity, position) in candidates {
        let distance_sqr = position.distance_squared(reference);
        if distance_sqr < closest_distance_sqr {
            closest_distance_sqr = distance_sqr;
            closest = Some(entity);
        }
    }

    closest
}
